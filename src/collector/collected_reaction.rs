use serde::Serialize;
use serenity::model::channel::{Reaction, ReactionType};
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

/// One reaction event delivered to a collector
///
/// A plain snapshot of serenity's non-exhaustive `Reaction`, so collectors can
/// be fed and tested without a gateway connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedReaction {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub emoji: ReactionType,
}

impl CollectedReaction {
    pub fn new(
        message_id: MessageId,
        channel_id: ChannelId,
        user_id: UserId,
        emoji: impl Into<ReactionType>,
    ) -> Self {
        Self {
            message_id,
            channel_id,
            guild_id: None,
            user_id: Some(user_id),
            emoji: emoji.into(),
        }
    }
}

impl From<&Reaction> for CollectedReaction {
    fn from(reaction: &Reaction) -> Self {
        Self {
            message_id: reaction.message_id,
            channel_id: reaction.channel_id,
            guild_id: reaction.guild_id,
            user_id: reaction.user_id,
            emoji: reaction.emoji.clone(),
        }
    }
}
