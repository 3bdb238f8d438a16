//! Damage events and damage classification.

use std::collections::BTreeSet;

use crate::state::{ActorId, Vec3};

/// Well-known damage tags.
pub mod tags {
    /// Environment trigger that removes whatever enters it (out-of-world volume).
    pub const KILL_ZONE: &str = "killzone";
    /// Damage synthesized when the owning session drops.
    pub const DISCONNECT: &str = "disconnect";
    pub const EXPLOSION: &str = "explosion";
    pub const FALL: &str = "fall";
}

// ============================================================================
// Damage Type
// ============================================================================

/// Cause classification used by death reasons.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// No contributing damage.
    #[default]
    None,
    /// Weapon hit or any untagged damage.
    Direct,
    Explosion,
    Fall,
    /// Environment volume that kills on contact.
    KillTrigger,
    /// Owner left the match.
    Disconnect,
}

impl DamageType {
    /// Classifies a damage event from its tags.
    ///
    /// Tag precedence: disconnect, kill zone, explosion, fall.
    pub fn classify(info: &DamageInfo) -> Self {
        if info.has_tag(tags::DISCONNECT) {
            Self::Disconnect
        } else if info.has_tag(tags::KILL_ZONE) {
            Self::KillTrigger
        } else if info.has_tag(tags::EXPLOSION) {
            Self::Explosion
        } else if info.has_tag(tags::FALL) {
            Self::Fall
        } else {
            Self::Direct
        }
    }
}

// ============================================================================
// Damage Info
// ============================================================================

/// A single damage event. Immutable once reported.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    /// Damage amount. The engine rejects negative reports.
    pub amount: f32,
    /// Actor that caused the damage, if any.
    pub source: Option<ActorId>,
    pub tags: BTreeSet<String>,
    pub world_position: Vec3,
}

impl DamageInfo {
    /// Creates a damage event; negative amounts are clamped to zero.
    pub fn new(amount: f32, source: Option<ActorId>) -> Self {
        Self {
            amount: amount.max(0.0),
            source,
            tags: BTreeSet::new(),
            world_position: Vec3::ZERO,
        }
    }

    /// Damage with no attributable source (environment, summed batches).
    pub fn sourceless(amount: f32) -> Self {
        Self::new(amount, None)
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.world_position = position;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true when this event comes from an environment kill trigger.
    pub fn is_kill_zone(&self) -> bool {
        self.has_tag(tags::KILL_ZONE)
    }
}
