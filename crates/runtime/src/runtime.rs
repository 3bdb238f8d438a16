//! High-level runtime orchestrator.
//!
//! The runtime owns the match worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive a match.

use tokio::task::JoinHandle;
use tracing::warn;

use skirmish_core::MatchState;

use crate::api::{EnvelopeProvider, MatchHandle, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::router::AuthorityRouter;
use crate::workers::MatchWorker;

/// Hosted match.
///
/// [`MatchHandle`] provides a cloneable façade for sessions and tools.
pub struct Runtime {
    handle: MatchHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime with an empty match.
    pub fn start(config: RuntimeConfig) -> Runtime {
        Self::builder().config(config).build()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> MatchHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Feeds envelopes from `provider` until it is exhausted.
    ///
    /// Rejected envelopes are logged and skipped; channel failures abort.
    /// Returns how many envelopes were accepted.
    pub async fn drive(&self, provider: &mut dyn EnvelopeProvider) -> Result<usize> {
        let mut accepted = 0;
        loop {
            let state = self.handle.query_state().await?;
            let Some(envelope) = provider.next_envelope(&state).await else {
                return Ok(accepted);
            };
            let command = envelope.command.label();
            match self.handle.send(envelope).await {
                Ok(()) => accepted += 1,
                Err(error @ RuntimeError::Unauthorized { .. }) => {
                    warn!(command, %error, "envelope rejected");
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Shutdown the runtime gracefully
    ///
    /// Other clones of the handle must be dropped first or this waits for
    /// them.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<MatchState>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial match state
    pub fn initial_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    /// Spawn the match worker. Must be called within a tokio runtime.
    pub fn build(self) -> Runtime {
        let RuntimeConfig {
            combat,
            event_buffer_size,
            command_buffer_size,
            host_session,
        } = self.config;

        let (command_tx, command_rx) = tokio::sync::mpsc::channel(command_buffer_size);
        let event_bus = EventBus::with_capacity(event_buffer_size);
        let handle = MatchHandle::new(command_tx, event_bus.clone());

        let worker = MatchWorker::new(
            self.state.unwrap_or_else(MatchState::new),
            combat,
            AuthorityRouter::new(host_session),
            command_rx,
            event_bus,
        );
        let worker_handle = tokio::spawn(worker.run());

        Runtime {
            handle,
            worker_handle,
        }
    }
}
