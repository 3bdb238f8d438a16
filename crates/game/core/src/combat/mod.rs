//! Damage queueing, death attribution and the death sequence.
//!
//! # Architecture
//!
//! - **Value types**: [`DamageInfo`], [`DamageType`], [`DeathReason`]
//! - **State**: [`HealthState`] (current/max health, FIFO queue, death guard)
//! - **State machine**: [`DeathPhase`] driven by timer-delivered [`DeathStage`]s
//!
//! Orchestration (who gets notified, when the sequence starts) lives in
//! [`crate::engine`]; this module stays free of cross-actor concerns.

pub mod damage;
pub mod death;
pub mod error;
pub mod health;
pub mod reason;

pub use damage::{DamageInfo, DamageType, tags};
pub use death::{DeathPhase, DeathStage, RemovalMode, blast_for, grave_position, marker_position};
pub use error::CombatError;
pub use health::{DamageBatch, HealthState};
pub use reason::DeathReason;
