//! Run configuration assembled from the process environment.
//!
//! Values are read through a lookup function rather than `std::env` directly so
//! tests can pass an explicit environment.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::model::Period;
use crate::settings::CollectorSettings;
use crate::{AppError, Result};

pub const TOKEN_VARS: [&str; 2] = ["INPUT_SLACK_BOT_TOKEN", "SLACK_BOT_TOKEN"];
pub const CHANNELS_VARS: [&str; 2] = ["INPUT_SLACK_CHANNELS", "SLACK_CHANNELS"];
pub const START_DATE_VAR: &str = "START_DATE";
pub const END_DATE_VAR: &str = "END_DATE";
pub const GITHUB_OUTPUT_VAR: &str = "GITHUB_OUTPUT";

const SECONDS_PER_DAY: i64 = 86_400;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Epoch-second bounds used for history lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub oldest: i64,
    pub latest: i64,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The end bound is pushed one full day past `end` so the last day is included.
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            oldest: midnight_utc(self.start),
            latest: midnight_utc(self.end) + SECONDS_PER_DAY,
        }
    }

    pub fn period(&self) -> Period {
        Period {
            start: format!("{}T00:00:00Z", self.start.format("%Y-%m-%d")),
            end: format!("{}T23:59:59Z", self.end.format("%Y-%m-%d")),
        }
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Split a comma-separated channel list, trimming entries and dropping empties
/// and repeats.
pub fn parse_channels(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|ch| !ch.is_empty())
        .filter(|ch| seen.insert(ch.to_string()))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub channels: Vec<String>,
    pub range: DateRange,
    pub max_messages: usize,
    pub page_size: u16,
    pub output_path: PathBuf,
    pub github_output: Option<PathBuf>,
}

/// What a run should do after reading its configuration.
#[derive(Debug)]
pub enum Invocation {
    /// No channels configured: exit successfully without touching the API.
    NoChannels,
    Collect(Config),
}

impl Config {
    pub fn from_env(collector: &CollectorSettings) -> Result<Invocation> {
        Self::from_lookup(|key| std::env::var(key).ok(), collector)
    }

    pub fn from_lookup<F>(lookup: F, collector: &CollectorSettings) -> Result<Invocation>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.is_empty())
        };

        let token = first_set(&TOKEN_VARS).ok_or(AppError::MissingToken)?;

        let channels = parse_channels(&first_set(&CHANNELS_VARS).unwrap_or_default());
        if channels.is_empty() {
            return Ok(Invocation::NoChannels);
        }

        let (start, end) = match (first_set(&[START_DATE_VAR]), first_set(&[END_DATE_VAR])) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(AppError::MissingDates),
        };
        let range = DateRange::new(parse_date(&start)?, parse_date(&end)?)?;

        Ok(Invocation::Collect(Config {
            token,
            channels,
            range,
            max_messages: collector.max_messages,
            page_size: collector.page_size,
            output_path: PathBuf::from(&collector.output),
            github_output: first_set(&[GITHUB_OUTPUT_VAR]).map(PathBuf::from),
        }))
    }
}
