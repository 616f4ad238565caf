use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::collector::{CollectedReaction, MessageTarget};

/// Receiving end of a reaction subscription
///
/// Dropping the stream cancels the subscription and runs the source's
/// cleanup, if it registered one.
pub struct ReactionStream {
    rx: mpsc::UnboundedReceiver<CollectedReaction>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl ReactionStream {
    pub fn new(rx: mpsc::UnboundedReceiver<CollectedReaction>) -> Self {
        Self { rx, on_drop: None }
    }

    /// Stream that calls `cleanup` once when dropped
    pub fn with_cleanup<F>(rx: mpsc::UnboundedReceiver<CollectedReaction>, cleanup: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            rx,
            on_drop: Some(Box::new(cleanup)),
        }
    }

    /// Next reaction, or `None` once the source stopped delivering
    pub async fn recv(&mut self) -> Option<CollectedReaction> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Result<CollectedReaction, TryRecvError> {
        self.rx.try_recv()
    }
}

impl Drop for ReactionStream {
    fn drop(&mut self) {
        if let Some(cleanup) = self.on_drop.take() {
            cleanup();
        }
    }
}

/// Interface for subscribing to reactions on a message
///
/// Implemented by [`ReactionHub`](super::ReactionHub) for live gateway events
/// and by mocks in tests.
pub trait ReactionSource: Send + Sync {
    /// Start delivering reaction-add events for `target`
    ///
    /// The stream ends when the source stops delivering, e.g. on shutdown.
    fn subscribe(&self, target: MessageTarget) -> ReactionStream;
}
