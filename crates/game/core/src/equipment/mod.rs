//! Per-player equipment slots.
//!
//! [`Inventory`] is generic over [`Equippable`] so hosts can plug their own
//! item instances in; [`EquipmentItem`] is the default.
mod error;
mod input;
mod inventory;
mod item;

pub use error::InventoryError;
pub use input::{BrowseState, InputFrame};
pub use inventory::{Inventory, MountControl, NoMounts, PlayerContext};
pub use item::{
    EquipmentCategory, EquipmentFactory, EquipmentItem, Equippable, ItemTemplate, SwapRules,
    TemplateFactory, UsageState, UsePhase,
};
