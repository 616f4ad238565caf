use serenity::client::Context;
use serenity::model::channel::Message;
use serenity::prelude::{TypeMap, TypeMapKey};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::reaction_hub::ReactionHub;
use super::reaction_source::ReactionSource;
use crate::collector::{CollectorOptions, ReactionCollector};

/// Shared-data slot holding the client's [`ReactionHub`]
pub struct ReactionHubKey;

impl TypeMapKey for ReactionHubKey {
    type Value = Arc<ReactionHub>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{extension} is already registered; the existing registration was kept")]
    DuplicateRegistration { extension: &'static str },
}

/// Register `hub` in the client's shared data
///
/// An already registered hub is never replaced: the call logs a warning and
/// returns [`RegistrationError::DuplicateRegistration`], which callers may
/// treat as non-fatal.
pub fn install(data: &mut TypeMap, hub: Arc<ReactionHub>) -> Result<(), RegistrationError> {
    if data.contains_key::<ReactionHubKey>() {
        warn!(
            extension = "ReactionHub",
            "Reaction hub already registered; keeping the existing one. \
             Disable any other module that installs one."
        );
        return Err(RegistrationError::DuplicateRegistration {
            extension: "ReactionHub",
        });
    }

    data.insert::<ReactionHubKey>(hub);
    info!(extension = "ReactionHub", "Reaction hub registered");
    Ok(())
}

/// Look up the hub registered with [`install`]
pub async fn registered_hub(ctx: &Context) -> Option<Arc<ReactionHub>> {
    ctx.data.read().await.get::<ReactionHubKey>().cloned()
}

/// Collect reactions directly on a message
pub trait AwaitReactions {
    fn await_reactions<'a, S>(
        &'a self,
        source: &'a S,
        options: CollectorOptions,
    ) -> impl Future<Output = ReactionCollector> + Send + 'a
    where
        S: ReactionSource + ?Sized;
}

impl AwaitReactions for Message {
    fn await_reactions<'a, S>(
        &'a self,
        source: &'a S,
        options: CollectorOptions,
    ) -> impl Future<Output = ReactionCollector> + Send + 'a
    where
        S: ReactionSource + ?Sized,
    {
        ReactionCollector::new(self, options).run(source)
    }
}
