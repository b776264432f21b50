//! Per-channel collection: name lookup, paginated history, thread replies.
//!
//! Everything here is strictly sequential. Failures are contained at the level
//! they happen: a failed name lookup falls back to the channel id, a failed
//! thread fetch leaves a message without replies, and a failed history fetch
//! turns the whole channel into an error entry.

use tracing::{debug, error, info, warn};

use crate::Result;
use crate::config::TimeWindow;
use crate::filter::{is_bot_message, without_bots};
use crate::model::{ChannelResult, MessageRecord, ReplyRecord};
use crate::source::{HistoryRequest, RawMessage, SlackSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Hard cap on retained top-level messages per channel.
    pub max_messages: usize,
    pub page_size: u16,
}

/// Top-level messages gathered from history, bots already removed.
#[derive(Debug, Default)]
pub struct Collected {
    pub messages: Vec<RawMessage>,
    pub truncated: bool,
}

pub async fn collect_channel<S>(
    source: &S,
    channel_id: &str,
    window: TimeWindow,
    limits: Limits,
) -> ChannelResult
where
    S: SlackSource + ?Sized,
{
    info!(channel = channel_id, "Collecting messages from channel");

    match collect_messages(source, channel_id, window, limits).await {
        Ok((name, messages)) => {
            info!(
                channel = channel_id,
                count = messages.len(),
                "Collected messages (bots filtered out)"
            );
            ChannelResult::collected(channel_id, name, messages)
        }
        Err(e) => {
            error!(channel = channel_id, error = %e, "Error collecting from channel");
            ChannelResult::failed(channel_id, e.to_string())
        }
    }
}

async fn collect_messages<S>(
    source: &S,
    channel_id: &str,
    window: TimeWindow,
    limits: Limits,
) -> Result<(String, Vec<MessageRecord>)>
where
    S: SlackSource + ?Sized,
{
    let name = resolve_channel_name(source, channel_id).await;
    let collected = paginate(source, channel_id, window, limits).await?;

    let mut records = Vec::with_capacity(collected.messages.len());
    for message in &collected.messages {
        let replies = if message.reply_count.unwrap_or(0) > 0 {
            resolve_thread(source, channel_id, message).await
        } else {
            Vec::new()
        };
        records.push(MessageRecord::shape(message, replies));
    }

    Ok((name, records))
}

/// Best-effort display name; any failure or missing name yields the id.
pub async fn resolve_channel_name<S>(source: &S, channel_id: &str) -> String
where
    S: SlackSource + ?Sized,
{
    match source.channel_name(channel_id).await {
        Ok(Some(name)) if !name.is_empty() => {
            info!(channel = channel_id, name = %name, "Channel name");
            name
        }
        Ok(_) => channel_id.to_string(),
        Err(e) => {
            warn!(channel = channel_id, error = %e, "Could not get channel info");
            channel_id.to_string()
        }
    }
}

/// Walk history pages until the cursor runs out or `limits.max_messages` human
/// messages are held. Hitting the cap mid-page drops the rest of that page and
/// any later pages.
pub async fn paginate<S>(
    source: &S,
    channel_id: &str,
    window: TimeWindow,
    limits: Limits,
) -> Result<Collected>
where
    S: SlackSource + ?Sized,
{
    let mut collected = Collected::default();
    let mut cursor: Option<String> = None;

    loop {
        let request = HistoryRequest {
            channel_id: channel_id.to_string(),
            window,
            limit: limits.page_size,
            cursor: cursor.take(),
        };
        let page = source.history_page(&request).await?;
        debug!(
            channel = channel_id,
            fetched = page.messages.len(),
            "Fetched history page"
        );

        cursor = page.continuation().map(str::to_string);

        for message in without_bots(page.messages) {
            collected.messages.push(message);
            if collected.messages.len() >= limits.max_messages {
                collected.truncated = true;
                break;
            }
        }

        if collected.truncated {
            warn!(
                channel = channel_id,
                limit = limits.max_messages,
                "Reached message limit, remaining history skipped"
            );
            break;
        }

        if cursor.is_none() {
            break;
        }
    }

    Ok(collected)
}

/// Replies of `parent`, excluding the parent itself and bot posts. Errors are
/// logged and produce an empty list.
pub async fn resolve_thread<S>(
    source: &S,
    channel_id: &str,
    parent: &RawMessage,
) -> Vec<ReplyRecord>
where
    S: SlackSource + ?Sized,
{
    match source.thread(channel_id, &parent.ts).await {
        Ok(thread) => thread
            .iter()
            .skip(1)
            .filter(|reply| reply.ts != parent.ts && !is_bot_message(reply))
            .map(ReplyRecord::from)
            .collect(),
        Err(e) => {
            warn!(
                channel = channel_id,
                ts = %parent.ts,
                error = %e,
                "Could not fetch replies for message"
            );
            Vec::new()
        }
    }
}
