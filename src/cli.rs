use std::path::PathBuf;

use clap::Parser;

use crate::Result;
use crate::settings::{CollectorSettings, SETTINGS_FILE, Settings};

#[derive(Parser, Debug)]
#[command(name = "collect-slack-data")]
#[command(about = "Collect messages, threads and reactions from Slack channels for a date range")]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML); defaults are used when it does not exist
    #[arg(long, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Output file path, overrides the settings file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum messages kept per channel, overrides the settings file
    #[arg(long)]
    pub max_messages: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Settings file values with command-line overrides applied.
    pub fn collector_settings(&self) -> Result<CollectorSettings> {
        let mut collector = Settings::load(&self.settings)?.collector;

        if let Some(output) = &self.output {
            collector.output = output.clone();
        }
        if let Some(max_messages) = self.max_messages {
            collector.max_messages = max_messages;
        }

        collector.validate()?;
        Ok(collector)
    }
}
