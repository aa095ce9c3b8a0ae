// Listing output
//
// The listing only appears at its destination once fully written: it goes to
// a temporary file in the same directory, which is then renamed over the
// destination. The listing keeps the permissions of the file it replaces, or
// gets the usual 0644 when it is new.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::luminary::error::ConvertError;

/// Write `contents` to `path`, creating missing parent directories
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;

    // Temporary files are created owner-only
    let permissions = match fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => new_file_permissions(&temp)?,
    };
    temp.as_file().set_permissions(permissions)?;

    temp.persist(path).map_err(|e| ConvertError::Io(e.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions(_temp: &NamedTempFile) -> Result<Permissions, ConvertError> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(temp: &NamedTempFile) -> Result<Permissions, ConvertError> {
    Ok(temp.as_file().metadata()?.permissions())
}
