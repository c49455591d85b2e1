//! User settings, read from `config.json` in the config directory.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use mero_lib::query::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CliError;

/// Defaults applied when neither a query file nor a flag sets a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            date_format: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(CliError::read(path, e)),
        };
        let settings: Self =
            serde_json::from_str(&text).map_err(|e| CliError::parse(path, e))?;
        settings.level_filter()?;
        Ok(settings)
    }

    /// The configured log level.
    pub fn level_filter(&self) -> Result<LevelFilter, CliError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| CliError::LogLevel(self.log_level.clone()))
    }
}
