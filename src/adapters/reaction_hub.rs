use serenity::model::channel::Reaction;
use serenity::model::id::MessageId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::reaction_source::{ReactionSource, ReactionStream};
use crate::collector::{CollectedReaction, CollectorOptions, MessageTarget, ReactionCollector};

type Subscriber = (u64, mpsc::UnboundedSender<CollectedReaction>);
type SubscriberTable = Mutex<HashMap<MessageId, Vec<Subscriber>>>;

/// Fans out gateway reaction events to per-message subscribers
///
/// Call [`ReactionHub::dispatch`] from the event handler's `reaction_add`.
/// A subscription is removed as soon as its [`ReactionStream`] is dropped,
/// so finished collectors leave nothing behind in the table.
#[derive(Default)]
pub struct ReactionHub {
    subscribers: Arc<SubscriberTable>,
    next_id: AtomicU64,
}

impl ReactionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a reaction to every live subscriber of its message
    ///
    /// Returns the number of subscribers that received it.
    pub fn dispatch(&self, reaction: &Reaction) -> usize {
        self.dispatch_collected(CollectedReaction::from(reaction))
    }

    pub fn dispatch_collected(&self, reaction: CollectedReaction) -> usize {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return 0;
        };

        let Some(senders) = subscribers.get_mut(&reaction.message_id) else {
            trace!(message_id = %reaction.message_id, "No collectors for reaction");
            return 0;
        };

        senders.retain(|(_, tx)| tx.send(reaction.clone()).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            subscribers.remove(&reaction.message_id);
        }

        debug!(
            message_id = %reaction.message_id,
            delivered,
            "Reaction dispatched to collectors"
        );
        delivered
    }

    /// Number of messages with at least one registered subscriber
    pub fn watched_messages(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Collect reactions on an explicitly given message
    pub async fn await_message_reactions(
        &self,
        message: impl Into<MessageTarget>,
        options: CollectorOptions,
    ) -> ReactionCollector {
        ReactionCollector::new(message, options).run(self).await
    }

    /// Drop every subscription, ending all running collectors
    pub fn close(&self) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.clear();
        }
    }
}

fn unsubscribe(table: &Weak<SubscriberTable>, message_id: MessageId, id: u64) {
    let Some(table) = table.upgrade() else {
        return;
    };
    let Ok(mut subscribers) = table.lock() else {
        return;
    };
    if let Some(senders) = subscribers.get_mut(&message_id) {
        senders.retain(|(sub_id, _)| *sub_id != id);
        if senders.is_empty() {
            subscribers.remove(&message_id);
        }
    }
    trace!(%message_id, id, "Reaction subscription removed");
}

impl ReactionSource for ReactionHub {
    fn subscribe(&self, target: MessageTarget) -> ReactionStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message_id = target.message_id;
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.entry(message_id).or_default().push((id, tx));
        }
        // A poisoned table drops `tx`, so the stream reports closed
        let table = Arc::downgrade(&self.subscribers);
        ReactionStream::with_cleanup(rx, move || unsubscribe(&table, message_id, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::EndReason;
    use serenity::model::id::{ChannelId, UserId};

    fn reaction(message_id: u64) -> CollectedReaction {
        CollectedReaction::new(MessageId::new(message_id), ChannelId::new(1), UserId::new(5), '✅')
    }

    fn target(message_id: u64) -> MessageTarget {
        MessageTarget::new(MessageId::new(message_id), ChannelId::new(1))
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_message() {
        let hub = ReactionHub::new();
        let mut first = hub.subscribe(target(1));
        let mut second = hub.subscribe(target(2));

        assert_eq!(hub.dispatch_collected(reaction(1)), 1);
        assert_eq!(hub.dispatch_collected(reaction(3)), 0);

        assert_eq!(first.recv().await, Some(reaction(1)));
        assert!(second.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let hub = ReactionHub::new();
        let stream = hub.subscribe(target(1));
        assert_eq!(hub.watched_messages(), 1);

        drop(stream);
        assert_eq!(hub.watched_messages(), 0);
        assert_eq!(hub.dispatch_collected(reaction(1)), 0);
    }

    #[test]
    fn test_drop_keeps_other_subscribers() {
        let hub = ReactionHub::new();
        let first = hub.subscribe(target(1));
        let mut second = hub.subscribe(target(1));

        drop(first);
        assert_eq!(hub.watched_messages(), 1);
        assert_eq!(hub.dispatch_collected(reaction(1)), 1);
        assert_eq!(second.try_recv(), Ok(reaction(1)));
    }

    #[test]
    fn test_drop_after_hub_is_gone() {
        let hub = ReactionHub::new();
        let stream = hub.subscribe(target(1));
        drop(hub);
        drop(stream);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_collectors_leave_no_subscriptions() {
        let hub = ReactionHub::new();
        let options = CollectorOptions::default().with_timeout_ms(10);

        for i in 1..=100 {
            let collector = hub.await_message_reactions(target(i), options.clone()).await;
            assert_eq!(collector.end_reason(), Some(EndReason::Timeout));
        }

        assert_eq!(hub.watched_messages(), 0);
    }

    #[tokio::test]
    async fn test_close_ends_streams() {
        let hub = ReactionHub::new();
        let mut stream = hub.subscribe(target(1));
        hub.close();
        assert_eq!(stream.recv().await, None);
    }
}
