//! Reaction collectors and validated embed builders for serenity bots
//!
//! - [`collector`]: wait for reactions on a message until a timeout, a count
//!   limit, or a manual stop.
//! - [`embed`]: build embeds with Discord's limits checked up front.
//! - [`adapters`]: wire both into a serenity client.

pub mod adapters;
pub mod collector;
pub mod embed;

pub use adapters::{AwaitReactions, ReactionHub, ReactionSource};
pub use collector::{CollectorOptions, ReactionCollector};
pub use embed::{EmbedBuilder, EmbedError, EmbedPayload, RichEmbed};
