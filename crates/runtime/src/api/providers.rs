//! Asynchronous abstraction for sourcing match requests.
//!
//! Runtime users plug in [`EnvelopeProvider`] implementations so a match can
//! be driven by network sessions, scripted fixtures, or bots.
use std::collections::VecDeque;

use async_trait::async_trait;
use skirmish_core::MatchState;

use super::inbound::Envelope;

/// Supplies the next request to run against the match.
#[async_trait]
pub trait EnvelopeProvider: Send {
    /// Returns the next envelope, or `None` once the source is exhausted.
    ///
    /// `state` is a snapshot taken after the previous envelope completed.
    async fn next_envelope(&mut self, state: &MatchState) -> Option<Envelope>;
}

/// Replays a fixed sequence of envelopes.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Envelope>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Envelope>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn push(&mut self, envelope: Envelope) {
        self.script.push_back(envelope);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl EnvelopeProvider for ScriptedProvider {
    async fn next_envelope(&mut self, _state: &MatchState) -> Option<Envelope> {
        self.script.pop_front()
    }
}
