use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::{ChannelResult, Period, SlackData};
use crate::{AppError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub messages: usize,
    pub replies: usize,
    pub failed_channels: usize,
}

impl SlackData {
    pub fn new(channels: Vec<ChannelResult>, period: Period) -> Self {
        Self { channels, period }
    }

    pub fn totals(&self) -> Totals {
        self.channels.iter().fold(Totals::default(), |acc, ch| Totals {
            messages: acc.messages + ch.messages.len(),
            replies: acc.replies + ch.reply_count(),
            failed_channels: acc.failed_channels + usize::from(ch.error.is_some()),
        })
    }
}

pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| AppError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| AppError::JsonSerialize(e.to_string()))?;
    writer.flush().map_err(|e| AppError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

pub fn read_slack_data(path: &Path) -> Result<SlackData> {
    let file = File::open(path).map_err(|e| AppError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| AppError::JsonParse(e.to_string()))
}

/// Append the run results as `key=value` lines to a CI results file.
pub fn append_ci_outputs(ci_file: &Path, output_file: &Path, totals: &Totals) -> Result<()> {
    let write_err = |e: std::io::Error| AppError::WriteFile {
        path: ci_file.display().to_string(),
        source: e,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ci_file)
        .map_err(write_err)?;

    let lines = format!(
        "slack-data-file={}\ntotal-messages={}\ntotal-replies={}\n",
        output_file.display(),
        totals.messages,
        totals.replies
    );
    file.write_all(lines.as_bytes()).map_err(write_err)?;
    Ok(())
}

pub fn print_summary(output_file: &Path, totals: &Totals) {
    println!("Slack data collection complete");
    println!("  Total messages: {}", totals.messages);
    println!("  Total replies: {}", totals.replies);
    if totals.failed_channels > 0 {
        println!("  Failed channels: {}", totals.failed_channels);
    }
    println!("  Output file: {}", output_file.display());
}
