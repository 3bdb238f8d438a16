//! Authoritative match state.
//!
//! This module owns the data describing actors, players, sessions and turn
//! bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through [`crate::engine::CombatEngine`].
pub mod replicated;
pub mod session;
pub mod types;

use std::collections::BTreeMap;

pub use replicated::{ReplicaKey, ReplicaUpdate, ReplicaValue, Replicated};
pub use session::SessionRegistry;
pub use types::{
    ActorId, ActorKind, ActorSpec, ActorState, Facing, ItemId, MarkerId, OnDeath, PlayerId,
    PlayerState, SessionId, TurnState, Vec3,
};

use crate::equipment::PlayerContext;

/// Canonical snapshot of one match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub actors: BTreeMap<ActorId, ActorState>,
    pub players: BTreeMap<PlayerId, PlayerState>,
    pub sessions: SessionRegistry,
    pub turn: TurnState,
    next_marker_id: u64,
    next_item_id: u32,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            next_marker_id: 1,
            next_item_id: 1,
            ..Self::default()
        }
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn player_by_session(&self, session: SessionId) -> Option<&PlayerState> {
        self.sessions
            .player(session)
            .and_then(|player| self.players.get(&player))
    }

    /// Display name of an actor, falling back to its id once it is gone.
    pub fn actor_name(&self, id: ActorId) -> String {
        self.actors
            .get(&id)
            .map_or_else(|| id.to_string(), |actor| actor.name.clone())
    }

    /// Snapshot of the facts inventory guards need about `player`.
    pub fn player_context(&self, player: PlayerId) -> PlayerContext {
        match self.players.get(&player) {
            Some(state) => PlayerContext {
                player,
                valid: state.connected,
                is_active_player: self.turn.is_active(player),
                has_acted_this_turn: state.has_acted_this_turn,
                active_actor: state
                    .active_actor
                    .filter(|actor| self.actors.contains_key(actor)),
            },
            None => PlayerContext {
                player,
                valid: false,
                is_active_player: false,
                has_acted_this_turn: false,
                active_actor: None,
            },
        }
    }

    /// Allocates a new marker id. Ids are never reused.
    pub fn allocate_marker(&mut self) -> MarkerId {
        let id = MarkerId(self.next_marker_id);
        self.next_marker_id = self.next_marker_id.wrapping_add(1);
        id
    }

    /// Item id counter handed to equipment factories.
    pub fn item_counter(&mut self) -> &mut u32 {
        &mut self.next_item_id
    }
}
