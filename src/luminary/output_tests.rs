// Listing output tests

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::luminary::output::write_atomically;

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/listing.asm");

        write_atomically(&path, "; listing\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "; listing\n");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.asm");
        fs::write(&path, "old").unwrap();

        write_atomically(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");

        // The temporary file was renamed, not left beside the listing
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    fn mode(path: &std::path::Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let shared = dir.path().join("shared.asm");
        fs::write(&shared, "old").unwrap();
        fs::set_permissions(&shared, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomically(&shared, "new").unwrap();
        assert_eq!(mode(&shared), 0o644);

        let private = dir.path().join("private.asm");
        fs::write(&private, "old").unwrap();
        fs::set_permissions(&private, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomically(&private, "new").unwrap();
        assert_eq!(mode(&private), 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_listing_is_world_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.asm");

        write_atomically(&path, "; listing\n").unwrap();
        assert_eq!(mode(&path), 0o644);
    }
}
