// Converter configuration
//
// Optional TOML file; every field has a default so an empty file is valid.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use log::debug;
use serde::Deserialize;

use crate::luminary::error::ConvertError;

/// Environment variable naming a configuration file for the CLI
pub const CONFIG_ENV_VAR: &str = "YARN2LUMINARY_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Fixed banner date; today's date when unset
    pub date: Option<String>,
    /// chrono format string for today's date
    pub date_format: String,
    /// Name printed in the banner
    pub tool_name: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            date: None,
            date_format: "%d/%m/%Y".to_string(),
            tool_name: "yarn2luminary".to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConvertError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConvertError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject date formats chrono cannot render
    pub fn validate(&self) -> Result<(), ConvertError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConvertError::Config(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let source = fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&source)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `YARN2LUMINARY_CONFIG`, defaults when unset
    pub fn from_env() -> Result<Self, ConvertError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Date string for the banner
    pub fn banner_date(&self) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => Local::now().format(&self.date_format).to_string(),
        }
    }
}
