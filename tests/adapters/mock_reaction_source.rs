use reactkit::adapters::{ReactionSource, ReactionStream};
use reactkit::collector::{CollectedReaction, MessageTarget};
use serenity::model::id::UserId;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// What a mock subscription delivers
#[derive(Clone)]
enum Script {
    /// Each reaction after its own delay, then the stream stays open
    Timed(Vec<(Duration, u64)>),
    /// One reaction per interval until the subscriber goes away
    Endless(Duration),
}

/// Mock ReactionSource that emits reactions on a schedule
///
/// Reactions are addressed to whatever message was subscribed, from the
/// given user IDs (`Endless` numbers users 1, 2, 3, ...).
pub struct MockReactionSource {
    script: Script,
    pub subscriptions: Arc<Mutex<Vec<MessageTarget>>>,
}

impl MockReactionSource {
    pub fn timed(events: Vec<(Duration, u64)>) -> Self {
        Self {
            script: Script::Timed(events),
            subscriptions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn endless(interval: Duration) -> Self {
        Self {
            script: Script::Endless(interval),
            subscriptions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_subscriptions(&self) -> Vec<MessageTarget> {
        self.subscriptions.lock().unwrap().clone()
    }
}

pub fn reaction_for(target: MessageTarget, user_id: u64) -> CollectedReaction {
    CollectedReaction::new(target.message_id, target.channel_id, UserId::new(user_id), '👍')
}

impl ReactionSource for MockReactionSource {
    fn subscribe(&self, target: MessageTarget) -> ReactionStream {
        self.subscriptions.lock().unwrap().push(target);

        let (tx, rx) = mpsc::unbounded_channel();
        let script = self.script.clone();

        tokio::spawn(async move {
            match script {
                Script::Timed(events) => {
                    for (delay, user_id) in events {
                        tokio::time::sleep(delay).await;
                        if tx.send(reaction_for(target, user_id)).is_err() {
                            return;
                        }
                    }
                    // Hold the stream open like a live gateway would
                    tx.closed().await;
                }
                Script::Endless(interval) => {
                    for user_id in 1.. {
                        tokio::time::sleep(interval).await;
                        if tx.send(reaction_for(target, user_id)).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        ReactionStream::new(rx)
    }
}
