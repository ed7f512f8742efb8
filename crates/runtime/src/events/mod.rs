//! Topic-based event bus for progression events.
//!
//! The service publishes an event for every observable change to a record.
//! Consumers subscribe only to the topics they need; publishing never fails
//! when nobody is listening.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::ProgressionEvent;
