//! Actor state: identity, placement, health and death bookkeeping.

use super::{ActorId, Facing, PlayerId, Vec3};
use crate::combat::{DeathPhase, DeathReason, HealthState};

/// What kind of participant an actor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// Player-controlled character. Damage is queued until the owner flushes.
    Character { owner: PlayerId },
    /// Anything else with health (crates, mines, barrels). Damage applies at once.
    Object,
}

/// Behaviors triggered when the actor's death sequence completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnDeath {
    pub explode: bool,
    pub proximity_detonate: bool,
    /// Proximity detonation already running.
    pub detonating: bool,
}

/// Parameters for spawning an actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSpec {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub position: Vec3,
    pub facing: Facing,
    pub max_health: f32,
    pub on_death: OnDeath,
}

impl ActorSpec {
    pub fn character(id: ActorId, name: impl Into<String>, owner: PlayerId, max_health: f32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ActorKind::Character { owner },
            position: Vec3::ZERO,
            facing: Facing::default(),
            max_health,
            on_death: OnDeath::default(),
        }
    }

    pub fn object(id: ActorId, name: impl Into<String>, max_health: f32) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ActorKind::Object,
            position: Vec3::ZERO,
            facing: Facing::default(),
            max_health,
            on_death: OnDeath::default(),
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    #[must_use]
    pub fn with_on_death(mut self, on_death: OnDeath) -> Self {
        self.on_death = on_death;
        self
    }
}

/// Live actor record. An actor is valid while it is present in the match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub position: Vec3,
    pub facing: Facing,
    pub health: HealthState,
    pub death: DeathPhase,
    /// Resolved once at lethal detection, frozen afterwards.
    pub death_reason: Option<DeathReason>,
    pub mounted_on: Option<ActorId>,
    pub on_death: OnDeath,
}

impl ActorState {
    pub fn from_spec(spec: ActorSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
            kind: spec.kind,
            position: spec.position,
            facing: spec.facing,
            health: HealthState::new(spec.max_health),
            death: DeathPhase::Alive,
            death_reason: None,
            mounted_on: None,
            on_death: spec.on_death,
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        match self.kind {
            ActorKind::Character { owner } => Some(owner),
            ActorKind::Object => None,
        }
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, ActorKind::Character { .. })
    }
}
