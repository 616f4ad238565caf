use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::collected_reaction::CollectedReaction;
use super::message_target::MessageTarget;
use super::options::CollectorOptions;
use crate::adapters::{ReactionSource, ReactionStream};

/// Why a collector finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured timeout elapsed
    Timeout,
    /// `max_count` matching reactions were collected
    Limit,
    /// [`StopHandle::stop`] was called
    Stopped,
    /// The reaction source dropped the subscription
    SourceClosed,
}

/// Notification sent to collector observers
///
/// `Collect` for a reaction is sent before that reaction is appended to
/// [`ReactionCollector::collected`]. `Stop` is always the last event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorEvent {
    Collect(CollectedReaction),
    Stop(EndReason),
}

/// Cloneable handle that ends a collector early
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<watch::Sender<bool>>,
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request termination
    ///
    /// Returns `true` for the call that actually stopped the collector; later
    /// calls do nothing and return `false`.
    pub fn stop(&self) -> bool {
        self.stopped.send_if_modified(|stopped| {
            if *stopped {
                false
            } else {
                *stopped = true;
                true
            }
        })
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// `true` while the collector is subscribed and collecting
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Collects reactions on one message until a timeout, a count limit, or a stop
///
/// Created per wait, run once, and read-only afterwards.
pub struct ReactionCollector {
    target: MessageTarget,
    options: CollectorOptions,
    collected: Vec<CollectedReaction>,
    end_reason: Option<EndReason>,
    stop: StopHandle,
    observers: Vec<mpsc::UnboundedSender<CollectorEvent>>,
}

impl ReactionCollector {
    pub fn new(target: impl Into<MessageTarget>, options: CollectorOptions) -> Self {
        let (stopped, _) = watch::channel(false);
        Self {
            target: target.into(),
            options,
            collected: Vec::new(),
            end_reason: None,
            stop: StopHandle {
                stopped: Arc::new(stopped),
                running: Arc::new(AtomicBool::new(false)),
            },
            observers: Vec::new(),
        }
    }

    /// Handle for stopping the collector while [`run`](Self::run) is pending
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop the collector; see [`StopHandle::stop`]
    pub fn stop(&self) -> bool {
        self.stop.stop()
    }

    /// Observe each collected reaction and the final stop as they happen
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CollectorEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    /// Collect until the first of timeout, count limit, stop, or source close
    ///
    /// Resolves with the finished collector. Reactions for other messages and
    /// reactions rejected by the filter are ignored.
    pub async fn run<S>(self, source: &S) -> Self
    where
        S: ReactionSource + ?Sized,
    {
        if self.stop.is_stopped() {
            return self.finish(EndReason::Stopped);
        }
        let stream = source.subscribe(self.target);
        self.run_with_stream(stream).await
    }

    /// Like [`run`](Self::run), on a subscription the caller opened earlier
    ///
    /// Subscribing before the watched message is visible to users avoids
    /// missing reactions that arrive before collection starts.
    pub async fn run_with_stream(mut self, mut stream: ReactionStream) -> Self {
        let mut stopped = self.stop.stopped.subscribe();
        if *stopped.borrow_and_update() {
            return self.finish(EndReason::Stopped);
        }

        self.stop.running.store(true, Ordering::Release);
        debug!(
            message_id = %self.target.message_id,
            options = ?self.options,
            "Reaction collector started"
        );

        let timeout = self.options.timeout();
        let timer = async move {
            match timeout {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(timer);

        let reason = loop {
            tokio::select! {
                biased;

                changed = stopped.changed() => {
                    if changed.is_err() || *stopped.borrow_and_update() {
                        break EndReason::Stopped;
                    }
                }
                () = &mut timer => break EndReason::Timeout,
                event = stream.recv() => {
                    let Some(reaction) = event else {
                        break EndReason::SourceClosed;
                    };
                    if self.accept(reaction) {
                        break EndReason::Limit;
                    }
                }
            }
        };

        self.finish(reason)
    }

    /// Record a reaction if it matches; returns `true` once the limit is hit
    fn accept(&mut self, reaction: CollectedReaction) -> bool {
        if reaction.message_id != self.target.message_id
            || !self.options.accepts(reaction.user_id)
        {
            return false;
        }

        debug!(
            message_id = %reaction.message_id,
            user_id = ?reaction.user_id,
            emoji = %reaction.emoji,
            "Reaction collected"
        );

        self.notify(CollectorEvent::Collect(reaction.clone()));
        self.collected.push(reaction);

        self.options
            .limit()
            .is_some_and(|limit| self.collected.len() >= limit)
    }

    fn finish(mut self, reason: EndReason) -> Self {
        self.stop.running.store(false, Ordering::Release);
        self.end_reason = Some(reason);
        // Later stop() calls must be no-ops
        self.stop.stop();

        info!(
            message_id = %self.target.message_id,
            collected = self.collected.len(),
            ?reason,
            "Reaction collector finished"
        );

        self.notify(CollectorEvent::Stop(reason));
        self.observers.clear();
        self
    }

    fn notify(&mut self, event: CollectorEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn target(&self) -> MessageTarget {
        self.target
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    /// Matching reactions in arrival order
    pub fn collected(&self) -> &[CollectedReaction] {
        &self.collected
    }

    pub fn into_collected(self) -> Vec<CollectedReaction> {
        self.collected
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// `None` until the collector has finished
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }
}
