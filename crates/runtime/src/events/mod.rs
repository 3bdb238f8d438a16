//! Topic-based event bus for match notifications.
//!
//! Engine output is split across topics so consumers subscribe only to what
//! they need: turn orchestration listens to combat, clients to presentation,
//! observers to replication.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::Event;
