//! Observer-side copy of replicated fields.
//!
//! Updates can arrive late or out of order; a mirror keeps the highest
//! version seen per field and drops anything older.
use std::collections::HashMap;

use skirmish_core::{ActorId, PlayerId, ReplicaKey, ReplicaUpdate, ReplicaValue};
use tracing::trace;

use crate::events::Event;

#[derive(Debug, Clone, Default)]
pub struct ReplicaMirror {
    fields: HashMap<ReplicaKey, (u64, ReplicaValue)>,
}

impl ReplicaMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `update`, returning `false` when it is not newer than what the
    /// mirror already holds.
    pub fn apply(&mut self, update: ReplicaUpdate) -> bool {
        if let Some((version, _)) = self.fields.get(&update.key)
            && *version >= update.version
        {
            trace!(key = ?update.key, version = update.version, "stale replica update");
            return false;
        }
        self.fields.insert(update.key, (update.version, update.value));
        true
    }

    /// Applies the payload of a replication event; other events are ignored.
    pub fn observe(&mut self, event: &Event) -> bool {
        match event {
            Event::Replication(update) => self.apply(*update),
            _ => false,
        }
    }

    pub fn get(&self, key: ReplicaKey) -> Option<ReplicaValue> {
        self.fields.get(&key).map(|(_, value)| *value)
    }

    pub fn version(&self, key: ReplicaKey) -> Option<u64> {
        self.fields.get(&key).map(|(version, _)| *version)
    }

    pub fn health(&self, actor: ActorId) -> Option<f32> {
        match self.get(ReplicaKey::CurrentHealth(actor))? {
            ReplicaValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn death_invoked(&self, actor: ActorId) -> bool {
        matches!(
            self.get(ReplicaKey::DeathInvoked(actor)),
            Some(ReplicaValue::Flag(true))
        )
    }

    pub fn active_slot(&self, player: PlayerId) -> Option<usize> {
        match self.get(ReplicaKey::ActiveSlot(player))? {
            ReplicaValue::Slot(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn equipment_active(&self, player: PlayerId) -> bool {
        matches!(
            self.get(ReplicaKey::EquipmentActive(player)),
            Some(ReplicaValue::Flag(true))
        )
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
