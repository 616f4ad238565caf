// Trait definitions
pub mod reaction_source;

// Implementations
pub mod extensions;
pub mod reaction_hub;

// Re-exports for convenience
pub use extensions::{AwaitReactions, ReactionHubKey, RegistrationError, install, registered_hub};
pub use reaction_hub::ReactionHub;
pub use reaction_source::{ReactionSource, ReactionStream};
