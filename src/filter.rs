use crate::source::RawMessage;

const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// A message counts as automated when it carries a bot id, a bot profile, or the
/// `bot_message` subtype. Reactions are never filtered.
pub fn is_bot_message(message: &RawMessage) -> bool {
    message.bot_id.as_deref().is_some_and(|id| !id.is_empty())
        || message.bot_profile.as_ref().is_some_and(|p| !p.is_null())
        || message.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE)
}

pub fn without_bots<I>(messages: I) -> impl Iterator<Item = RawMessage>
where
    I: IntoIterator<Item = RawMessage>,
{
    messages.into_iter().filter(|m| !is_bot_message(m))
}
