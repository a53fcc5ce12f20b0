//! Notifications for the presentation layer.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: What happened, with light payloads (ids, not cards)
//! - [`Observer`]: Anything that wants to hear about it (closures included)
//! - [`EventBus`]: The ordered observer list owned by the `Session`
//!
//! Every successful state change emits at least one event; errors emit
//! none. Delivery is synchronous; an observer sees the state as it
//! is right after the change.

pub mod event;
pub mod observer;

pub use event::GameEvent;
pub use observer::{EventBus, Observer};
