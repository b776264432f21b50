use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

pub const SETTINGS_FILE: &str = "settings.toml";

pub const DEFAULT_OUTPUT_FILE: &str = "slack_data.json";
pub const DEFAULT_MAX_MESSAGES: usize = 1000;
pub const DEFAULT_PAGE_SIZE: u16 = 100;

/// Upper bound Slack accepts for `conversations.history` page sizes.
const MAX_PAGE_SIZE: u16 = 1000;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub collector: CollectorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorSettings {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_max_messages", rename = "max-messages")]
    pub max_messages: usize,
    #[serde(default = "default_page_size", rename = "page-size")]
    pub page_size: u16,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            max_messages: default_max_messages(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

fn default_page_size() -> u16 {
    DEFAULT_PAGE_SIZE
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| AppError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|e| AppError::TomlParse(e.to_string()))?;
        settings.collector.validate()?;
        Ok(settings)
    }
}

impl CollectorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_messages == 0 {
            return Err(AppError::InvalidSetting(
                "max-messages must be greater than zero".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AppError::InvalidSetting(format!(
                "page-size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.output.trim().is_empty() {
            return Err(AppError::InvalidSetting("output must not be empty".to_string()));
        }
        Ok(())
    }
}
