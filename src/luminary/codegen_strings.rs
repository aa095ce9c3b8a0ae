/// codegen_strings.rs
/// String table emission for AsmCodeGen
///
use std::fmt::Write;

use log::debug;

use crate::luminary::codegen::AsmCodeGen;
use crate::luminary::error::ConvertError;
use crate::luminary::program::StringTable;
use crate::luminary::sanitise;

impl AsmCodeGen {
    /// Declare every string as a zero terminated byte run, then realign
    pub fn emit_string_table(&mut self, strings: &StringTable) -> Result<(), ConvertError> {
        writeln!(self.output, "; String table")?;

        for (id, info) in strings.iter() {
            let label = self.label(id);
            let text = sanitise::sanitise_text(&info.text);
            writeln!(self.output, "{}: dc.b \"{}\",0", label, text)?;
        }

        // dc.b runs can leave the location counter on an odd address
        writeln!(self.output, "\teven")?;
        writeln!(self.output)?;

        debug!("Emitted {} string table entries", strings.len());
        Ok(())
    }
}
