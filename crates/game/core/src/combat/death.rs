//! Death sequence state machine.
//!
//! ```text
//! Alive ──lethal──▶ LethalDetected ──Grace (+500)──▶ EffectsStaged ──Detonate (+750)──▶ Removed
//!                        │                                                               ▲
//!                        └──────────────── RemovalMode::Immediate ───────────────────────┘
//! ```
//!
//! Stages are delivered by timers owned by the runtime. Each delivery is
//! checked against the stored phase, so a stage that arrives for a destroyed
//! actor or out of order is dropped without error.

use crate::config::{BlastProfile, CombatConfig};
use crate::state::{Facing, MarkerId, Vec3};

/// How the actor leaves play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RemovalMode {
    /// Delayed marker, explosion and grave.
    #[default]
    Staged,
    /// Skip delays and effects (kill zones).
    Immediate,
}

/// Timer-delivered stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DeathStage {
    /// Observers have rendered zero health; stage the marker.
    Grace,
    /// Marker fuse elapsed; explode and remove.
    Detonate,
}

/// Where an actor is in its death sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathPhase {
    #[default]
    Alive,
    LethalDetected { removal: RemovalMode },
    EffectsStaged { marker: MarkerId, position: Vec3 },
    Removed,
}

impl DeathPhase {
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Returns true when `stage` is the next expected delivery.
    pub fn accepts(&self, stage: DeathStage) -> bool {
        matches!(
            (self, stage),
            (
                Self::LethalDetected {
                    removal: RemovalMode::Staged
                },
                DeathStage::Grace
            ) | (Self::EffectsStaged { .. }, DeathStage::Detonate)
        )
    }
}

/// Marker position: shifted behind the actor when it faces left.
pub fn marker_position(position: Vec3, facing: Facing, config: &CombatConfig) -> Vec3 {
    match facing {
        Facing::Left => position.offset_x(-config.marker_facing_offset),
        Facing::Right => position,
    }
}

/// Grave position: snapped to the grave plane and lifted.
pub fn grave_position(position: Vec3, config: &CombatConfig) -> Vec3 {
    position
        .with_y(config.grave_plane_y)
        .with_z(position.z + config.grave_lift_z)
}

/// Blast used for the death explosion.
pub fn blast_for(from_disconnect: bool, config: &CombatConfig) -> BlastProfile {
    if from_disconnect {
        config.disconnect_blast
    } else {
        config.standard_blast
    }
}
