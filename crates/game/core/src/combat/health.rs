//! Per-actor health with a FIFO damage queue.
//!
//! Reported damage is queued and only applied when the owning session flushes
//! the queue, so several hits landing in one turn resolve as a single
//! subtraction with full knowledge of the lethal batch.

use std::collections::VecDeque;

use super::damage::DamageInfo;
use crate::outbound::Outbox;
use crate::state::{ActorId, ReplicaKey, Replicated};

/// Damage dequeued by a flush.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageBatch {
    /// Entries in report order.
    pub entries: Vec<DamageInfo>,
    pub total: f32,
}

/// Health bookkeeping for one actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthState {
    max_health: f32,
    current_health: Replicated<f32>,
    /// Monotonic: false -> true once, never reset.
    death_invoked: Replicated<bool>,
    has_been_damaged: Replicated<bool>,
    pending: VecDeque<DamageInfo>,
}

impl HealthState {
    /// Creates a full-health state.
    pub fn new(max_health: f32) -> Self {
        Self {
            max_health,
            current_health: Replicated::new(max_health),
            death_invoked: Replicated::new(false),
            has_been_damaged: Replicated::new(false),
            pending: VecDeque::new(),
        }
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current(&self) -> f32 {
        self.current_health.get()
    }

    pub fn death_invoked(&self) -> bool {
        self.death_invoked.get()
    }

    pub fn has_been_damaged(&self) -> bool {
        self.has_been_damaged.get()
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &DamageInfo> {
        self.pending.iter()
    }

    /// Most recently queued, not yet flushed event.
    pub fn last_pending(&self) -> Option<&DamageInfo> {
        self.pending.back()
    }

    pub fn is_depleted(&self) -> bool {
        self.current() <= 0.0
    }

    /// True when health is depleted and no death has been invoked yet.
    pub fn is_lethal(&self) -> bool {
        self.is_depleted() && !self.death_invoked()
    }

    /// Queues a damage event without touching health.
    pub fn enqueue(&mut self, actor: ActorId, info: DamageInfo, out: &mut Outbox) {
        self.pending.push_back(info);
        if self.has_been_damaged.set(true) {
            out.replicate(ReplicaKey::HasBeenDamaged(actor), &self.has_been_damaged);
        }
    }

    /// Dequeues every pending event at once.
    ///
    /// Returns `None` when nothing was queued. Clears `has_been_damaged`.
    pub fn drain(&mut self, actor: ActorId, out: &mut Outbox) -> Option<DamageBatch> {
        if self.pending.is_empty() {
            return None;
        }

        if self.has_been_damaged.set(false) {
            out.replicate(ReplicaKey::HasBeenDamaged(actor), &self.has_been_damaged);
        }

        let entries: Vec<DamageInfo> = self.pending.drain(..).collect();
        let total = entries.iter().map(|info| info.amount).sum();
        Some(DamageBatch { entries, total })
    }

    /// Subtracts `amount` from current health.
    pub fn subtract(&mut self, actor: ActorId, amount: f32, out: &mut Outbox) {
        let next = self.current() - amount;
        if self.current_health.set(next) {
            out.replicate(ReplicaKey::CurrentHealth(actor), &self.current_health);
        }
    }

    /// Adds `amount` to current health. Not clamped to `max_health`.
    pub fn heal(&mut self, actor: ActorId, amount: f32, out: &mut Outbox) {
        let next = self.current() + amount;
        if self.current_health.set(next) {
            out.replicate(ReplicaKey::CurrentHealth(actor), &self.current_health);
        }
    }

    /// Sets the death guard. Idempotent.
    pub fn mark_death_invoked(&mut self, actor: ActorId, out: &mut Outbox) {
        if self.death_invoked.set(true) {
            out.replicate(ReplicaKey::DeathInvoked(actor), &self.death_invoked);
        }
    }
}
