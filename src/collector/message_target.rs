use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, GuildId, MessageId};

/// Message a collector watches
///
/// Holds just the identity needed to subscribe to the message's reactions,
/// so callers can collect on messages they only know by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageTarget {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

impl MessageTarget {
    pub fn new(message_id: MessageId, channel_id: ChannelId) -> Self {
        Self {
            message_id,
            channel_id,
            guild_id: None,
        }
    }
}

impl From<&Message> for MessageTarget {
    fn from(message: &Message) -> Self {
        Self {
            message_id: message.id,
            channel_id: message.channel_id,
            guild_id: message.guild_id,
        }
    }
}
