//! In-memory `SlackSource` with scripted responses and a request log.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::source::{HistoryPage, HistoryRequest, RawMessage, SlackSource};
use crate::{AppError, Result};

pub fn human(ts: &str) -> RawMessage {
    RawMessage {
        ts: ts.to_string(),
        user: Some("U100".to_string()),
        text: Some(format!("message {ts}")),
        ..Default::default()
    }
}

pub fn bot(ts: &str) -> RawMessage {
    RawMessage {
        ts: ts.to_string(),
        bot_id: Some("B100".to_string()),
        text: Some(format!("bot message {ts}")),
        ..Default::default()
    }
}

pub fn threaded(ts: &str, reply_count: u64) -> RawMessage {
    RawMessage {
        thread_ts: Some(ts.to_string()),
        reply_count: Some(reply_count),
        ..human(ts)
    }
}

#[derive(Default)]
pub struct FakeSlack {
    names: HashMap<String, std::result::Result<String, String>>,
    histories: HashMap<String, std::result::Result<Vec<Vec<RawMessage>>, String>>,
    threads: HashMap<(String, String), std::result::Result<Vec<RawMessage>, String>>,
    history_log: Mutex<Vec<HistoryRequest>>,
    thread_log: Mutex<Vec<(String, String)>>,
    name_log: Mutex<Vec<String>>,
}

impl FakeSlack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, channel: &str, name: &str) -> Self {
        self.names.insert(channel.to_string(), Ok(name.to_string()));
        self
    }

    pub fn with_name_error(mut self, channel: &str, error: &str) -> Self {
        self.names.insert(channel.to_string(), Err(error.to_string()));
        self
    }

    /// Each inner vec is one page; pages are chained with `page-<n>` cursors.
    pub fn with_pages(mut self, channel: &str, pages: Vec<Vec<RawMessage>>) -> Self {
        self.histories.insert(channel.to_string(), Ok(pages));
        self
    }

    pub fn with_history_error(mut self, channel: &str, error: &str) -> Self {
        self.histories.insert(channel.to_string(), Err(error.to_string()));
        self
    }

    pub fn with_thread(mut self, channel: &str, ts: &str, messages: Vec<RawMessage>) -> Self {
        self.threads
            .insert((channel.to_string(), ts.to_string()), Ok(messages));
        self
    }

    pub fn with_thread_error(mut self, channel: &str, ts: &str, error: &str) -> Self {
        self.threads
            .insert((channel.to_string(), ts.to_string()), Err(error.to_string()));
        self
    }

    pub fn history_requests(&self) -> Vec<HistoryRequest> {
        self.history_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn thread_requests(&self) -> Vec<(String, String)> {
        self.thread_log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        let names = self.name_log.lock().map(|log| log.len()).unwrap_or_default();
        names + self.history_requests().len() + self.thread_requests().len()
    }
}

#[async_trait]
impl SlackSource for FakeSlack {
    async fn channel_name(&self, channel_id: &str) -> Result<Option<String>> {
        if let Ok(mut log) = self.name_log.lock() {
            log.push(channel_id.to_string());
        }
        match self.names.get(channel_id) {
            Some(Ok(name)) => Ok(Some(name.clone())),
            Some(Err(e)) => Err(AppError::SlackApi(e.clone())),
            None => Ok(None),
        }
    }

    async fn history_page(&self, request: &HistoryRequest) -> Result<HistoryPage> {
        if let Ok(mut log) = self.history_log.lock() {
            log.push(request.clone());
        }
        let pages = match self.histories.get(&request.channel_id) {
            Some(Ok(pages)) => pages,
            Some(Err(e)) => return Err(AppError::SlackApi(e.clone())),
            None => return Err(AppError::SlackApi("channel_not_found".to_string())),
        };

        let index = request
            .cursor
            .as_deref()
            .and_then(|c| c.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        let messages = pages.get(index).cloned().unwrap_or_default();
        let next_cursor = if index + 1 < pages.len() {
            Some(format!("page-{}", index + 1))
        } else {
            Some(String::new())
        };

        Ok(HistoryPage {
            messages,
            next_cursor,
        })
    }

    async fn thread(&self, channel_id: &str, thread_ts: &str) -> Result<Vec<RawMessage>> {
        if let Ok(mut log) = self.thread_log.lock() {
            log.push((channel_id.to_string(), thread_ts.to_string()));
        }
        match self
            .threads
            .get(&(channel_id.to_string(), thread_ts.to_string()))
        {
            Some(Ok(messages)) => Ok(messages.clone()),
            Some(Err(e)) => Err(AppError::SlackApi(e.clone())),
            None => Err(AppError::SlackApi("thread_not_found".to_string())),
        }
    }
}
