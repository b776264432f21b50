use std::path::PathBuf;

use tracing::info;

use crate::Result;
use crate::cli::Cli;
use crate::collect::{Limits, collect_channel};
use crate::config::{Config, Invocation};
use crate::model::SlackData;
use crate::output::{Totals, append_ci_outputs, print_summary, write_json};
use crate::slack::SlackWebApi;
use crate::source::SlackSource;

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No channels were configured; nothing was fetched or written.
    Skipped,
    Written { path: PathBuf, totals: Totals },
}

pub async fn run_collect(cli: &Cli) -> Result<RunOutcome> {
    let collector = cli.collector_settings()?;
    let invocation = Config::from_env(&collector)?;

    run_invocation(invocation, |config| SlackWebApi::new(&config.token)).await
}

/// Run a parsed invocation, building the API client only when there is work to do.
pub async fn run_invocation<S, F>(invocation: Invocation, connect: F) -> Result<RunOutcome>
where
    S: SlackSource,
    F: FnOnce(&Config) -> Result<S>,
{
    let config = match invocation {
        Invocation::NoChannels => {
            info!("No Slack channels specified, skipping Slack data collection");
            return Ok(RunOutcome::Skipped);
        }
        Invocation::Collect(config) => config,
    };

    let source = connect(&config)?;
    run_with_source(&config, &source).await
}

pub async fn run_with_source<S>(config: &Config, source: &S) -> Result<RunOutcome>
where
    S: SlackSource + ?Sized,
{
    info!(
        start = %config.range.start,
        end = %config.range.end,
        channels = config.channels.len(),
        "Collecting Slack data"
    );

    let window = config.range.window();
    let limits = Limits {
        max_messages: config.max_messages,
        page_size: config.page_size,
    };

    let mut channels = Vec::with_capacity(config.channels.len());
    for channel_id in &config.channels {
        channels.push(collect_channel(source, channel_id, window, limits).await);
    }

    let data = SlackData::new(channels, config.range.period());
    write_json(&config.output_path, &data)?;

    let totals = data.totals();
    print_summary(&config.output_path, &totals);

    if let Some(ci_file) = &config.github_output {
        append_ci_outputs(ci_file, &config.output_path, &totals)?;
    }

    Ok(RunOutcome::Written {
        path: config.output_path.clone(),
        totals,
    })
}
