//! `SlackSource` backed by the Slack Web API through slack-morphism.

use async_trait::async_trait;
use slack_morphism::prelude::*;

use crate::source::{HistoryPage, HistoryRequest, RawMessage, SlackSource};
use crate::{AppError, Result};

pub struct SlackWebApi {
    client: SlackHyperClient,
    token: SlackApiToken,
}

impl SlackWebApi {
    pub fn new(token: &str) -> Result<Self> {
        let connector =
            SlackClientHyperConnector::new().map_err(|e| AppError::SlackApi(e.to_string()))?;
        Ok(Self {
            client: SlackClient::new(connector),
            token: SlackApiToken::new(SlackApiTokenValue(token.to_string())),
        })
    }
}

#[async_trait]
impl SlackSource for SlackWebApi {
    async fn channel_name(&self, channel_id: &str) -> Result<Option<String>> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiConversationsInfoRequest::new(SlackChannelId(channel_id.to_string()));

        let response = session
            .conversations_info(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        Ok(response.channel.name)
    }

    async fn history_page(&self, request: &HistoryRequest) -> Result<HistoryPage> {
        let session = self.client.open_session(&self.token);
        let api_request = SlackApiConversationsHistoryRequest::new()
            .with_channel(SlackChannelId(request.channel_id.clone()))
            .with_oldest(epoch_to_slack_ts(request.window.oldest))
            .with_latest(epoch_to_slack_ts(request.window.latest))
            .with_limit(request.limit)
            .opt_cursor(request.cursor.clone().map(SlackCursorId));

        let response = session
            .conversations_history(&api_request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        let messages = response
            .messages
            .iter()
            .map(to_raw)
            .collect::<Result<Vec<_>>>()?;

        let next_cursor = response
            .response_metadata
            .and_then(|meta| meta.next_cursor)
            .map(|cursor| cursor.0);

        Ok(HistoryPage {
            messages,
            next_cursor,
        })
    }

    async fn thread(&self, channel_id: &str, thread_ts: &str) -> Result<Vec<RawMessage>> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiConversationsRepliesRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackTs(thread_ts.to_string()),
        );

        let response = session
            .conversations_replies(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        response.messages.iter().map(to_raw).collect()
    }
}

fn epoch_to_slack_ts(seconds: i64) -> SlackTs {
    SlackTs(format!("{}.000000", seconds))
}

/// Project a typed history message onto the fields the collector reads, going
/// through its wire JSON so unknown fields are simply dropped.
fn to_raw(message: &SlackHistoryMessage) -> Result<RawMessage> {
    let value =
        serde_json::to_value(message).map_err(|e| AppError::JsonSerialize(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| AppError::JsonParse(e.to_string()))
}
