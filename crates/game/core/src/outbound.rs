//! Side effects produced by the engine.
//!
//! The core never talks to collaborators directly. Every notification,
//! presentation request, timer request and replicated-field change is
//! appended to an [`Outbox`] in the order it happened; the runtime routes
//! them afterwards.

use crate::combat::{DamageInfo, DeathStage};
use crate::state::{
    ActorId, ItemId, MarkerId, PlayerId, ReplicaKey, ReplicaUpdate, Replicated, ReplicaValue,
    Vec3,
};

/// Presentation request emitted during the death sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectRequest {
    MarkerSpawned { marker: MarkerId, position: Vec3 },
    MarkerDestroyed { marker: MarkerId },
    Explosion {
        position: Vec3,
        radius: f32,
        force: f32,
        source: ActorId,
    },
    Particles { position: Vec3, scale: f32 },
    Sound { cue: String, position: Vec3 },
    GraveSpawned { position: Vec3 },
}

/// Equip/holster transitions, observed identically by every participant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentEvent {
    Deployed {
        player: PlayerId,
        item: ItemId,
        slot: usize,
        carrier: ActorId,
    },
    Holstered {
        player: PlayerId,
        item: ItemId,
        slot: usize,
    },
    Dismounted { actor: ActorId, mount: ActorId },
    BrowseToggled { player: PlayerId, open: bool },
}

/// One outbound message.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outbound {
    /// Turn orchestrator: this actor took damage (scoring, turn bookkeeping).
    ActorDamaged { actor: ActorId },
    /// Authoritative host: this actor died.
    ActorDied { actor: ActorId },
    /// Floating damage number; negative values are heals.
    DamageNumber { actor: ActorId, amount: f32 },
    /// Listener event fired for every applied damage.
    ObjectDamaged { actor: ActorId, info: DamageInfo },
    /// Listener event fired when the death sequence completes.
    ObjectDied { actor: ActorId },
    /// Formatted line for the shared event log.
    DeathMessage(String),
    KillZoneIndicator { position: Vec3 },
    KillCredited { victim: ActorId, killer: ActorId },
    Effect(EffectRequest),
    ActorDestroyed { actor: ActorId },
    /// Timer request: deliver `stage` for `actor` after `delay_ms`.
    ScheduleDeathStage {
        actor: ActorId,
        stage: DeathStage,
        delay_ms: u64,
    },
    ExplodeOnDeath { actor: ActorId },
    ProximityDetonationStarted { actor: ActorId },
    Equipment(EquipmentEvent),
    Replicated(ReplicaUpdate),
}

/// Ordered sink for [`Outbound`] messages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outbox {
    messages: Vec<Outbound>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Outbound) {
        self.messages.push(message);
    }

    pub fn effect(&mut self, effect: EffectRequest) {
        self.messages.push(Outbound::Effect(effect));
    }

    pub fn equipment(&mut self, event: EquipmentEvent) {
        self.messages.push(Outbound::Equipment(event));
    }

    /// Announces the current state of a replicated field.
    pub fn replicate<T>(&mut self, key: ReplicaKey, field: &Replicated<T>)
    where
        T: Copy + PartialEq + Into<ReplicaValue>,
    {
        self.messages
            .push(Outbound::Replicated(ReplicaUpdate::of(key, field)));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outbound> {
        self.messages.iter()
    }

    pub fn into_vec(self) -> Vec<Outbound> {
        self.messages
    }
}

impl IntoIterator for Outbox {
    type Item = Outbound;
    type IntoIter = std::vec::IntoIter<Outbound>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
