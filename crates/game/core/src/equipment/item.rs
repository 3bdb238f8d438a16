//! Equipment instances and the capability contract the inventory relies on.

use crate::state::{ActorId, ItemId, PlayerId};

/// Equipment category; tools sort ahead of everything else.
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
pub enum EquipmentCategory {
    Tool,
    #[default]
    Weapon,
    Other,
}

/// Whether a weapon tolerates being swapped out while or after it is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapRules {
    pub can_swap_during_use: bool,
    pub can_swap_after_use: bool,
}

/// In-turn usage of a weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageState {
    pub is_firing: bool,
    pub times_used: u32,
    pub rules: SwapRules,
}

impl UsageState {
    pub fn new(rules: SwapRules) -> Self {
        Self {
            is_firing: false,
            times_used: 0,
            rules,
        }
    }

    /// Mid-use or post-use state that forbids holstering this weapon.
    pub fn blocks_swap(&self) -> bool {
        (self.is_firing && !self.rules.can_swap_during_use)
            || (self.times_used > 0 && !self.rules.can_swap_after_use)
    }
}

/// Phase reported by the weapon collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UsePhase {
    Started,
    Finished,
}

/// Data an item is instantiated from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: EquipmentCategory,
    /// Crate drop chance; zero or negative means the item never drops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drop_chance: f32,
    /// Starting ammo, `-1` for unlimited.
    #[cfg_attr(feature = "serde", serde(default = "unlimited_ammo"))]
    pub ammo: i32,
    /// Present for weapons; their usage gates slot swaps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub swap_rules: Option<SwapRules>,
}

#[cfg(feature = "serde")]
fn unlimited_ammo() -> i32 {
    crate::config::CombatConfig::UNLIMITED_AMMO
}

impl ItemTemplate {
    pub fn new(name: impl Into<String>, category: EquipmentCategory) -> Self {
        Self {
            name: name.into(),
            category,
            drop_chance: 0.0,
            ammo: crate::config::CombatConfig::UNLIMITED_AMMO,
            swap_rules: None,
        }
    }

    #[must_use]
    pub fn with_drop_chance(mut self, drop_chance: f32) -> Self {
        self.drop_chance = drop_chance;
        self
    }

    #[must_use]
    pub fn with_ammo(mut self, ammo: i32) -> Self {
        self.ammo = ammo;
        self
    }

    #[must_use]
    pub fn with_swap_rules(mut self, rules: SwapRules) -> Self {
        self.swap_rules = Some(rules);
        self
    }
}

// ============================================================================
// Capability contract
// ============================================================================

/// Capabilities the inventory needs from an equipment instance.
pub trait Equippable {
    fn id(&self) -> ItemId;

    fn slot_index(&self) -> usize;

    fn set_slot_index(&mut self, slot: usize);

    fn category(&self) -> EquipmentCategory;

    fn drop_chance(&self) -> f32;

    fn ammo(&self) -> i32;

    fn set_ammo(&mut self, ammo: i32);

    /// Usage state for weapons, `None` for items without swap restrictions.
    fn usage(&self) -> Option<UsageState>;

    fn usage_mut(&mut self) -> Option<&mut UsageState>;

    /// Actor currently holding this item, if deployed.
    fn carrier(&self) -> Option<ActorId>;

    fn initialize(&mut self, owner: PlayerId);

    fn deploy(&mut self, target: ActorId);

    fn holster(&mut self);
}

/// Turns templates into live items during inventory setup.
pub trait EquipmentFactory {
    type Item: Equippable;

    /// Returns `None` when the instance failed to materialize.
    fn instantiate(&mut self, template: &ItemTemplate) -> Option<Self::Item>;
}

// ============================================================================
// Concrete item
// ============================================================================

/// Default equipment instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub slot_index: usize,
    pub drop_chance: f32,
    pub category: EquipmentCategory,
    pub ammo: i32,
    pub usage: Option<UsageState>,
    pub owner: Option<PlayerId>,
    pub carrier: Option<ActorId>,
}

impl EquipmentItem {
    pub fn from_template(id: ItemId, template: &ItemTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            slot_index: 0,
            drop_chance: template.drop_chance,
            category: template.category,
            ammo: template.ammo,
            usage: template.swap_rules.map(UsageState::new),
            owner: None,
            carrier: None,
        }
    }

    pub fn has_unlimited_ammo(&self) -> bool {
        self.ammo == crate::config::CombatConfig::UNLIMITED_AMMO
    }
}

impl Equippable for EquipmentItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn slot_index(&self) -> usize {
        self.slot_index
    }

    fn set_slot_index(&mut self, slot: usize) {
        self.slot_index = slot;
    }

    fn category(&self) -> EquipmentCategory {
        self.category
    }

    fn drop_chance(&self) -> f32 {
        self.drop_chance
    }

    fn ammo(&self) -> i32 {
        self.ammo
    }

    fn set_ammo(&mut self, ammo: i32) {
        self.ammo = ammo;
    }

    fn usage(&self) -> Option<UsageState> {
        self.usage
    }

    fn usage_mut(&mut self) -> Option<&mut UsageState> {
        self.usage.as_mut()
    }

    fn carrier(&self) -> Option<ActorId> {
        self.carrier
    }

    fn initialize(&mut self, owner: PlayerId) {
        self.owner = Some(owner);
    }

    fn deploy(&mut self, target: ActorId) {
        self.carrier = Some(target);
    }

    fn holster(&mut self) {
        self.carrier = None;
    }
}

/// Factory that hands out sequential item ids.
#[derive(Debug)]
pub struct TemplateFactory<'a> {
    next_id: &'a mut u32,
}

impl<'a> TemplateFactory<'a> {
    pub fn new(next_id: &'a mut u32) -> Self {
        Self { next_id }
    }
}

impl EquipmentFactory for TemplateFactory<'_> {
    type Item = EquipmentItem;

    fn instantiate(&mut self, template: &ItemTemplate) -> Option<EquipmentItem> {
        if template.name.is_empty() {
            return None;
        }
        let id = ItemId(*self.next_id);
        *self.next_id = self.next_id.checked_add(1)?;
        Some(EquipmentItem::from_template(id, template))
    }
}
