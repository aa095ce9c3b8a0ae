// Luminary Converter Module
// Turns compiled Yarn dialogue programs into Luminary assembly listings

pub mod codegen;
pub mod codegen_instructions;
pub mod codegen_strings;
pub mod config;
pub mod error;
pub mod opcodes;
pub mod output;
pub mod program;
pub mod sanitise;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod opcodes_tests;
#[cfg(test)]
mod output_tests;

use log::{info, warn};

pub use codegen::{AsmCodeGen, Banner};
pub use config::ConverterConfig;
pub use error::ConvertError;
pub use program::{CompiledScript, Program, StringTable};

/// Main converter structure
pub struct LuminaryConverter {
    config: ConverterConfig,
}

impl Default for LuminaryConverter {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl LuminaryConverter {
    pub fn new(config: ConverterConfig) -> Self {
        LuminaryConverter { config }
    }

    /// Convert a compiled script document (TOML) into an assembly listing.
    ///
    /// `source` is only used in the banner; `program_name` scopes every label.
    pub fn convert(
        &self,
        document: &str,
        source: &str,
        program_name: &str,
    ) -> Result<String, ConvertError> {
        // Phase 1: Load the compiler output
        let script = CompiledScript::from_toml(document)?;

        // Phase 2: Check the producer contract
        let (program, strings) = script.into_parts()?;

        // Phase 3: Code generation
        self.generate(&program, &strings, source, program_name)
    }

    /// Render an already loaded program
    pub fn generate(
        &self,
        program: &Program,
        strings: &StringTable,
        source: &str,
        program_name: &str,
    ) -> Result<String, ConvertError> {
        self.config.validate()?;

        if !sanitise::is_label_safe(program_name) {
            warn!(
                "Program name '{}' is not alphanumeric, generated labels may not assemble",
                program_name
            );
        }

        let banner = Banner {
            tool_name: self.config.tool_name.clone(),
            date: self.config.banner_date(),
            source: source.to_string(),
        };

        let listing = AsmCodeGen::new(program_name).generate(program, strings, &banner)?;
        info!("Converted {} into program '{}'", source, program_name);
        Ok(listing)
    }
}
