//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on routing, workers, or timers.

pub mod errors;
pub mod handle;
pub mod inbound;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::MatchHandle;
pub use inbound::{Authority, Caller, Envelope, Inbound, Subject};
pub use providers::{EnvelopeProvider, ScriptedProvider};
