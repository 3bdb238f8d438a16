//! Versioned replicated fields.
//!
//! Fields that observers mirror are wrapped in [`Replicated`]. Only the
//! authoritative engine writes them; every effective write bumps the version
//! and is announced as a [`ReplicaUpdate`] so observers can discard stale
//! snapshots.

use crate::state::{ActorId, PlayerId};

/// A value paired with a monotonically increasing version.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replicated<T> {
    value: T,
    version: u64,
}

impl<T: Copy + PartialEq> Replicated<T> {
    pub const fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Writes `value`, returning `true` when it differs from the current one.
    ///
    /// Unchanged writes keep the version so observers see no spurious update.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }
}

impl<T: Copy + PartialEq + Default> Default for Replicated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Which replicated field an update refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplicaKey {
    CurrentHealth(ActorId),
    DeathInvoked(ActorId),
    HasBeenDamaged(ActorId),
    ActiveSlot(PlayerId),
    EquipmentActive(PlayerId),
}

/// Replicated payload.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplicaValue {
    Float(f32),
    Flag(bool),
    Slot(usize),
}

impl From<f32> for ReplicaValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ReplicaValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<usize> for ReplicaValue {
    fn from(value: usize) -> Self {
        Self::Slot(value)
    }
}

/// Authority-to-observer change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicaUpdate {
    pub key: ReplicaKey,
    pub version: u64,
    pub value: ReplicaValue,
}

impl ReplicaUpdate {
    pub fn of<T>(key: ReplicaKey, field: &Replicated<T>) -> Self
    where
        T: Copy + PartialEq + Into<ReplicaValue>,
    {
        Self {
            key,
            version: field.version(),
            value: field.get().into(),
        }
    }
}
