// Mock implementations for adapter layer testing

pub mod mock_reaction_source;

pub use mock_reaction_source::{MockReactionSource, reaction_for};
