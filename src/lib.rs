//! Collects messages, thread replies and reactions from a set of Slack channels
//! over a date range and writes them to a single JSON document.

pub mod cli;
pub mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod settings;
pub mod slack;
pub mod source;

#[cfg(test)]
mod test_support;

pub use cli::Cli;
pub use error::{AppError, Result};
