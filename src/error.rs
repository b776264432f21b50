use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("SLACK_BOT_TOKEN is required")]
    MissingToken,

    #[error("START_DATE and END_DATE must be set")]
    MissingDates,

    #[error("invalid date format: {0}")]
    InvalidDate(String),

    #[error("start date ({start}) must be before or equal to end date ({end})")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("failed to read file at {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file at {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialize(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
