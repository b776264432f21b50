//! Output document and the projection from raw Slack records into it.

use serde::{Deserialize, Serialize};

use crate::source::{RawMessage, RawReaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackData {
    pub channels: Vec<ChannelResult>,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelResult {
    pub id: String,
    pub name: String,
    pub messages: Vec<MessageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelResult {
    pub fn collected(id: &str, name: String, messages: Vec<MessageRecord>) -> Self {
        Self {
            id: id.to_string(),
            name,
            messages,
            error: None,
        }
    }

    /// A channel whose fetch failed as a whole: no messages, the id as name.
    pub fn failed(id: &str, error: String) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            messages: Vec::new(),
            error: Some(error),
        }
    }

    pub fn reply_count(&self) -> usize {
        self.messages.iter().map(|m| m.replies.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub text: String,
    pub thread_ts: Option<String>,
    pub reply_count: u64,
    pub replies: Vec<ReplyRecord>,
    pub reactions: Vec<ReactionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub name: String,
    pub count: u64,
    pub users: Vec<String>,
}

impl MessageRecord {
    /// Build the output record for a top-level message and its already-resolved replies.
    pub fn shape(raw: &RawMessage, replies: Vec<ReplyRecord>) -> Self {
        Self {
            ts: raw.ts.clone(),
            user: raw.user.clone(),
            text: raw.text.clone().unwrap_or_default(),
            thread_ts: raw.thread_ts.clone(),
            reply_count: raw.reply_count.unwrap_or(0),
            replies,
            reactions: raw
                .reactions
                .iter()
                .flatten()
                .map(ReactionRecord::from)
                .collect(),
        }
    }
}

impl From<&RawMessage> for ReplyRecord {
    fn from(raw: &RawMessage) -> Self {
        Self {
            ts: raw.ts.clone(),
            user: raw.user.clone(),
            text: raw.text.clone().unwrap_or_default(),
        }
    }
}

impl From<&RawReaction> for ReactionRecord {
    fn from(raw: &RawReaction) -> Self {
        Self {
            name: raw.name.clone(),
            count: raw.count,
            users: raw.users.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with_reaction() -> RawMessage {
        RawMessage {
            ts: "1704067200.000100".to_string(),
            user: Some("U1".to_string()),
            text: Some("ship it".to_string()),
            thread_ts: Some("1704067200.000100".to_string()),
            reply_count: Some(3),
            reactions: Some(vec![RawReaction {
                name: "thumbsup".to_string(),
                count: 2,
                users: Some(vec!["u1".to_string(), "u2".to_string()]),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_shape_copies_fields() {
        let replies = vec![ReplyRecord {
            ts: "1704067300.000200".to_string(),
            user: Some("U2".to_string()),
            text: "agreed".to_string(),
        }];

        let record = MessageRecord::shape(&raw_with_reaction(), replies.clone());

        assert_eq!(record.ts, "1704067200.000100");
        assert_eq!(record.user.as_deref(), Some("U1"));
        assert_eq!(record.text, "ship it");
        assert_eq!(record.thread_ts.as_deref(), Some("1704067200.000100"));
        assert_eq!(record.reply_count, 3);
        assert_eq!(record.replies, replies);
        assert_eq!(
            record.reactions,
            vec![ReactionRecord {
                name: "thumbsup".to_string(),
                count: 2,
                users: vec!["u1".to_string(), "u2".to_string()],
            }]
        );
    }

    #[test]
    fn test_shape_defaults() {
        let raw = RawMessage {
            ts: "1.0".to_string(),
            reactions: Some(vec![RawReaction {
                name: "eyes".to_string(),
                count: 1,
                users: None,
            }]),
            ..Default::default()
        };

        let record = MessageRecord::shape(&raw, Vec::new());

        assert_eq!(record.text, "");
        assert_eq!(record.thread_ts, None);
        assert_eq!(record.reply_count, 0);
        assert!(record.replies.is_empty());
        assert!(record.reactions[0].users.is_empty());
    }

    #[test]
    fn test_reply_drops_reactions_and_counts() {
        let reply = ReplyRecord::from(&raw_with_reaction());
        let value = serde_json::to_value(&reply).unwrap();

        assert_eq!(
            value,
            json!({"ts": "1704067200.000100", "user": "U1", "text": "ship it"})
        );
    }

    #[test]
    fn test_message_json_shape() {
        let raw = RawMessage {
            ts: "1.0".to_string(),
            user: Some("U1".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(MessageRecord::shape(&raw, Vec::new())).unwrap();

        assert_eq!(
            value,
            json!({
                "ts": "1.0",
                "user": "U1",
                "text": "",
                "thread_ts": null,
                "reply_count": 0,
                "replies": [],
                "reactions": []
            })
        );
    }

    #[test]
    fn test_failed_channel_uses_id_as_name() {
        let result = ChannelResult::failed("C123", "channel_not_found".to_string());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({"id": "C123", "name": "C123", "messages": [], "error": "channel_not_found"})
        );
    }

    #[test]
    fn test_collected_channel_omits_error() {
        let result = ChannelResult::collected("C123", "general".to_string(), Vec::new());
        let value = serde_json::to_value(&result).unwrap();

        assert!(value.get("error").is_none());
        assert_eq!(value["name"], "general");
    }
}
