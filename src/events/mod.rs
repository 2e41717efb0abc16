//! Events Module
//!
//! Named-topic publish/subscribe, decoupling event producers from their
//! observers.

mod channel;

pub use channel::{EventChannel, SubscriberId};
