mod collected_reaction;
mod message_target;
mod options;
mod reaction_collector;

// Re-export public API
pub use collected_reaction::CollectedReaction;
pub use message_target::MessageTarget;
pub use options::{
    CollectorError, CollectorOptions, DEFAULT_MAX_COUNT, DEFAULT_TIMEOUT_MS, ENV_PREFIX, UserFilter,
};
pub use reaction_collector::{CollectorEvent, EndReason, ReactionCollector, StopHandle};
