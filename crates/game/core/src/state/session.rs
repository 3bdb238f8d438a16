//! Session-to-player lookup, populated on registration and pruned on disconnect.

use std::collections::BTreeMap;

use super::{PlayerId, SessionId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRegistry {
    sessions: BTreeMap<SessionId, PlayerId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `session` to `player`, returning any player it replaced.
    pub fn insert(&mut self, session: SessionId, player: PlayerId) -> Option<PlayerId> {
        self.sessions.insert(session, player)
    }

    pub fn remove(&mut self, session: SessionId) -> Option<PlayerId> {
        self.sessions.remove(&session)
    }

    pub fn player(&self, session: SessionId) -> Option<PlayerId> {
        self.sessions.get(&session).copied()
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.sessions.contains_key(&session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
