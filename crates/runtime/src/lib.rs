//! Match runtime for the skirmish combat rules.
//!
//! This crate wraps [`skirmish_core::CombatEngine`] in a tokio task that
//! owns the authoritative match. Hosts embed [`Runtime`]; sessions talk to it
//! through [`MatchHandle`] with [`Envelope`]s that are checked by the
//! [`AuthorityRouter`] before they run.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`router`] decides who may issue which request
//! - [`replica`] mirrors replicated fields on observers
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod replica;
pub mod router;
pub mod runtime;

mod workers;

pub use api::{
    Authority, Caller, Envelope, EnvelopeProvider, Inbound, MatchHandle, Result, RuntimeError,
    ScriptedProvider, Subject,
};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, Topic};
pub use replica::ReplicaMirror;
pub use router::AuthorityRouter;
pub use runtime::{Runtime, RuntimeBuilder};
