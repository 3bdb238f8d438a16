//! Deterministic combat and loadout rules shared by hosts and observers.
//!
//! `skirmish-core` owns per-actor health with queued damage, death
//! attribution, the staged death sequence and per-player equipment slots. All
//! state mutation flows through [`engine::CombatEngine`], which reports every
//! side effect as an [`Outbound`] message instead of performing it.
pub mod combat;
pub mod config;
pub mod engine;
pub mod equipment;
pub mod error;
pub mod outbound;
pub mod state;

pub use combat::{
    CombatError, DamageBatch, DamageInfo, DamageType, DeathPhase, DeathReason, DeathStage,
    HealthState, RemovalMode, tags,
};
pub use config::{BlastProfile, CombatConfig};
pub use engine::CombatEngine;
pub use equipment::{
    BrowseState, EquipmentCategory, EquipmentFactory, EquipmentItem, Equippable, InputFrame,
    Inventory, InventoryError, ItemTemplate, MountControl, NoMounts, PlayerContext, SwapRules,
    TemplateFactory, UsageState, UsePhase,
};
pub use error::{ErrorSeverity, GameError, log_error};
pub use outbound::{EffectRequest, EquipmentEvent, Outbound, Outbox};
pub use state::{
    ActorId, ActorKind, ActorSpec, ActorState, Facing, ItemId, MarkerId, MatchState, OnDeath,
    PlayerId, PlayerState, ReplicaKey, ReplicaUpdate, ReplicaValue, Replicated, SessionId,
    SessionRegistry, TurnState, Vec3,
};
