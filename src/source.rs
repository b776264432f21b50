//! Remote API capability used by the collector.
//!
//! Raw records mirror the Slack wire format closely enough to deserialize from
//! `conversations.history` / `conversations.replies` JSON; unknown fields are ignored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::TimeWindow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub ts: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub reactions: Option<Vec<RawReaction>>,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub bot_profile: Option<serde_json::Value>,
    #[serde(default)]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReaction {
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub users: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub channel_id: String,
    pub window: TimeWindow,
    pub limit: u16,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub messages: Vec<RawMessage>,
    pub next_cursor: Option<String>,
}

impl HistoryPage {
    /// Cursor for the following page; Slack signals the last page with an empty string.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

#[async_trait]
pub trait SlackSource: Send + Sync {
    /// Display name of a channel, if the metadata carries one.
    async fn channel_name(&self, channel_id: &str) -> Result<Option<String>>;

    async fn history_page(&self, request: &HistoryRequest) -> Result<HistoryPage>;

    /// Every message of a thread, parent first.
    async fn thread(&self, channel_id: &str, thread_ts: &str) -> Result<Vec<RawMessage>>;
}
