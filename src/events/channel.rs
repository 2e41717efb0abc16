//! Event Channel Module
//!
//! Generic named-topic publish/subscribe registry. Producers publish to a
//! topic by name; subscribers registered under that topic are invoked
//! synchronously, in subscription order, without either side holding a
//! reference to the other.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use crate::error::{CacheError, Result};

// == Subscriber Id ==
/// Handle identifying one subscription on one topic.
///
/// Returned by `subscribe` and `subscribe_once`; passing it back to
/// `unsubscribe` removes exactly that subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

// == Callback ==
type Callback<P> = Box<dyn FnMut(&P) + Send>;

struct Subscriber<P> {
    id: SubscriberId,
    callback: Callback<P>,
    once: bool,
}

// == Event Channel ==
/// Named-topic publish/subscribe registry over payloads of type `P`.
///
/// The channel is single-threaded by design: `publish` runs every callback
/// to completion before returning. A panicking callback is contained and
/// logged; it neither reaches the publisher nor stops later callbacks.
pub struct EventChannel<P> {
    topics: HashMap<String, Vec<Subscriber<P>>>,
    next_id: u64,
}

impl<P> EventChannel<P> {
    // == Constructor ==
    /// Creates a new channel with no subscriptions.
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_id: 0,
        }
    }

    fn validate_topic(topic: &str) -> Result<()> {
        if topic.trim().is_empty() {
            return Err(CacheError::InvalidEventName(
                "event name must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    fn register(
        &mut self,
        topic: &str,
        callback: Callback<P>,
        once: bool,
    ) -> Result<SubscriberId> {
        Self::validate_topic(topic)?;

        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        self.topics
            .entry(topic.to_string())
            .or_default()
            .push(Subscriber { id, callback, once });

        Ok(id)
    }

    // == Subscribe ==
    /// Registers `callback` under `topic`.
    ///
    /// Callbacks for one topic are invoked in subscription order. Returns
    /// the id to pass to `unsubscribe`.
    pub fn subscribe<F>(&mut self, topic: &str, callback: F) -> Result<SubscriberId>
    where
        F: FnMut(&P) + Send + 'static,
    {
        self.register(topic, Box::new(callback), false)
    }

    // == Subscribe Once ==
    /// Registers `callback` under `topic` for a single delivery.
    ///
    /// The subscriber is removed after its first invocation, even if that
    /// invocation panics.
    pub fn subscribe_once<F>(&mut self, topic: &str, callback: F) -> Result<SubscriberId>
    where
        F: FnMut(&P) + Send + 'static,
    {
        self.register(topic, Box::new(callback), true)
    }

    // == Unsubscribe ==
    /// Removes the subscriber `id` from `topic`. Idempotent: unknown topics
    /// or ids are ignored.
    pub fn unsubscribe(&mut self, topic: &str, id: SubscriberId) {
        if let Some(subscribers) = self.topics.get_mut(topic) {
            subscribers.retain(|s| s.id != id);
            if subscribers.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    // == Publish ==
    /// Delivers `payload` to every subscriber of `topic`, synchronously and
    /// in subscription order. Returns the number of subscribers invoked.
    ///
    /// A panic inside a callback is caught and logged so the remaining
    /// callbacks still run and the publisher is unaffected.
    pub fn publish(&mut self, topic: &str, payload: &P) -> usize {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return 0;
        };

        let mut delivered = 0;
        for subscriber in subscribers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                (subscriber.callback)(payload);
            }));
            delivered += 1;

            if outcome.is_err() {
                error!(topic, subscriber = subscriber.id.0, "event subscriber panicked");
            }
        }

        // Every subscriber in the list was just invoked, so one-shot
        // subscriptions are spent regardless of how their callback ended.
        subscribers.retain(|s| !s.once);
        if subscribers.is_empty() {
            self.topics.remove(topic);
        }

        delivered
    }

    // == Subscriber Count ==
    /// Number of subscribers currently registered under `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    // == Snapshot ==
    /// Topic-to-subscriber-count view for debugging. No side effects.
    pub fn snapshot(&self) -> HashMap<String, usize> {
        self.topics
            .iter()
            .map(|(topic, subscribers)| (topic.clone(), subscribers.len()))
            .collect()
    }

    // == Clear ==
    /// Removes every subscription on every topic.
    pub fn clear(&mut self) {
        self.topics.clear();
    }
}

impl<P> Default for EventChannel<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventChannel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("topics", &self.snapshot())
            .finish()
    }
}
