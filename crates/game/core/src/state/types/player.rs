use super::{ActorId, PlayerId, SessionId};
use crate::equipment::{EquipmentItem, Inventory};

/// A participant controlling one or more characters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub session: SessionId,
    /// Characters owned by this player, in spawn order.
    pub actors: Vec<ActorId>,
    /// Character the player currently controls.
    pub active_actor: Option<ActorId>,
    pub has_acted_this_turn: bool,
    pub inventory: Inventory<EquipmentItem>,
    pub connected: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<String>, session: SessionId) -> Self {
        Self {
            id,
            name: name.into(),
            session,
            actors: Vec::new(),
            active_actor: None,
            has_acted_this_turn: false,
            inventory: Inventory::new(id),
            connected: true,
        }
    }

    /// Forgets `actor`, handing control to the next remaining character.
    pub fn release_actor(&mut self, actor: ActorId) {
        self.actors.retain(|owned| *owned != actor);
        if self.active_actor == Some(actor) {
            self.active_actor = self.actors.first().copied();
        }
    }
}
