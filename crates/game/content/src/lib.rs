//! Data-driven match content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Loadouts: the equipment templates every player starts with (RON)
//! - Combat tuning: delays, blast profiles and ammo rules (TOML)
//!
//! Content is consumed at setup time and never appears in match state.
//! All loaders use skirmish-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Loadout, LoadoutLoader};
