//! Cloneable façade for issuing requests to a running match.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! submitting envelopes, reading the state or streaming events from specific
//! topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use skirmish_core::MatchState;

use super::errors::{Result, RuntimeError};
use super::inbound::{Envelope, Inbound};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the match
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl MatchHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Submits an envelope and waits until the worker has processed it.
    ///
    /// Returns [`RuntimeError::Unauthorized`] when the caller lacks authority;
    /// rule violations inside the engine are logged and reported as success.
    pub async fn send(&self, envelope: Envelope) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Submit {
                envelope,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Shorthand for a host-issued request.
    pub async fn host(&self, command: Inbound) -> Result<()> {
        self.send(Envelope::host(command)).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use skirmish_runtime::Topic;
    ///
    /// let mut combat = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat.recv().await {
    ///     // scoring, turn bookkeeping ...
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current match state (read-only snapshot)
    pub async fn query_state(&self) -> Result<MatchState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
