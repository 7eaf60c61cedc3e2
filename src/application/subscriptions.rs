//! Subscription Hub
//!
//! Per-post publish/subscribe fan-out for newly created comments. The hub
//! owns the only core-held shared mutable state in the system: a registry
//! mapping post ids to the live delivery channels of their subscribers.
//!
//! Delivery is best-effort, in-process, and non-blocking: a subscriber whose
//! channel buffer is full has that comment dropped rather than stalling the
//! publisher or the other subscribers. There is no replay; late subscribers
//! only see comments created after they subscribed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::Comment;

/// One registered delivery channel.
struct Subscriber {
    id: u64,
    tx: mpsc::Sender<Comment>,
}

/// Identifies a registration so it can be released exactly once.
///
/// Callers must pass the handle back to [`SubscriptionHub::unsubscribe`] on
/// every termination path (disconnect, timeout, shutdown); unsubscribing an
/// already-released handle is a no-op.
#[derive(Debug)]
pub struct SubscriptionHandle {
    post_id: String,
    id: u64,
}

impl SubscriptionHandle {
    /// The post this subscription listens on.
    pub fn post_id(&self) -> &str {
        &self.post_id
    }
}

/// Concurrent registry of live comment subscribers, keyed by post id.
///
/// A single mutex guards both mutation (subscribe/unsubscribe) and the
/// iteration snapshot taken by publish, so a publish never walks a
/// half-updated set or delivers to a channel that was just released. The
/// lock is never held across a channel send.
pub struct SubscriptionHub {
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,
    next_id: AtomicU64,
    channel_capacity: usize,
}

impl SubscriptionHub {
    /// Create a hub whose delivery channels buffer up to `channel_capacity`
    /// comments per subscriber.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Register a new subscriber for `post_id`.
    ///
    /// Returns the receiving end of a bounded channel plus the handle needed
    /// to unsubscribe. Safe to call concurrently with publishes and other
    /// subscribe/unsubscribe calls.
    pub fn subscribe(&self, post_id: &str) -> (SubscriptionHandle, mpsc::Receiver<Comment>) {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        self.subscribers
            .lock()
            .entry(post_id.to_string())
            .or_default()
            .push(Subscriber { id, tx });

        debug!(post_id, subscription_id = id, "subscriber registered");

        (
            SubscriptionHandle {
                post_id: post_id.to_string(),
                id,
            },
            rx,
        )
    }

    /// Release a subscription. Idempotent: releasing a handle twice is a
    /// no-op, not an error.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        let mut subscribers = self.subscribers.lock();
        if let Some(channels) = subscribers.get_mut(&handle.post_id) {
            channels.retain(|s| s.id != handle.id);
            // Empty entries are removed so the registry never leaks post keys
            if channels.is_empty() {
                subscribers.remove(&handle.post_id);
            }
            debug!(
                post_id = %handle.post_id,
                subscription_id = handle.id,
                "subscriber released"
            );
        }
    }

    /// Deliver `comment` to every current subscriber of its post, in
    /// registration order. Returns the number of successful deliveries.
    ///
    /// Non-blocking per subscriber: a full buffer means that subscriber is
    /// lagging and the comment is dropped for it alone.
    pub fn publish(&self, comment: &Comment) -> usize {
        // Snapshot the senders under the lock, deliver outside it.
        let channels: Vec<(u64, mpsc::Sender<Comment>)> = {
            let subscribers = self.subscribers.lock();
            match subscribers.get(&comment.post_id) {
                Some(channels) => channels.iter().map(|s| (s.id, s.tx.clone())).collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;
        for (id, tx) in channels {
            match tx.try_send(comment.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(
                        post_id = %comment.post_id,
                        subscription_id = id,
                        "subscriber buffer full, dropping comment"
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    // Receiver already gone; unsubscribe will clean it up
                    debug!(
                        post_id = %comment.post_id,
                        subscription_id = id,
                        "subscriber channel closed"
                    );
                }
            }
        }

        delivered
    }

    /// Number of live subscriptions for a post.
    pub fn subscriber_count(&self, post_id: &str) -> usize {
        self.subscribers
            .lock()
            .get(post_id)
            .map_or(0, |channels| channels.len())
    }

    /// Drop every registered channel. Receivers observe end-of-stream.
    pub fn shutdown(&self) {
        let mut subscribers = self.subscribers.lock();
        let dropped: usize = subscribers.values().map(|c| c.len()).sum();
        subscribers.clear();
        debug!(dropped, "subscription hub shut down");
    }
}
