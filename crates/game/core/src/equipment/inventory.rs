//! Ordered equipment slots with a single active slot.
//!
//! Slot indices are dense (`0..len`) and reassigned whenever the order
//! changes. At most one item is deployed at a time: deploying an item first
//! holsters whatever else is out.
//!
//! Every method returns `Err` instead of acting when a request is stale or
//! illegal (wrong turn, item mid-use, empty slot); callers treat those as
//! no-ops.

use std::cmp::Ordering;

use super::error::InventoryError;
use super::input::{BrowseState, InputFrame};
use super::item::{EquipmentCategory, EquipmentFactory, EquipmentItem, Equippable, ItemTemplate, UsePhase};
use crate::config::CombatConfig;
use crate::outbound::{EquipmentEvent, Outbox};
use crate::state::{ActorId, ItemId, PlayerId, ReplicaKey, Replicated};

/// Turn and validity facts about the inventory's owner, captured per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerContext {
    pub player: PlayerId,
    /// Player still in the match.
    pub valid: bool,
    pub is_active_player: bool,
    pub has_acted_this_turn: bool,
    /// Character currently controlled, if it is still alive.
    pub active_actor: Option<ActorId>,
}

/// Lets holstering take a carrier off whatever it is riding.
pub trait MountControl {
    fn dismount(&mut self, carrier: ActorId, out: &mut Outbox);
}

/// [`MountControl`] for worlds without mountables.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMounts;

impl MountControl for NoMounts {
    fn dismount(&mut self, _carrier: ActorId, _out: &mut Outbox) {}
}

/// Per-player equipment slot manager.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory<T = EquipmentItem> {
    owner: PlayerId,
    items: Vec<T>,
    active_slot: Replicated<usize>,
    equipment_active: Replicated<bool>,
    browse: BrowseState,
}

impl<T: Equippable> Inventory<T> {
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            items: Vec::new(),
            active_slot: Replicated::new(0),
            equipment_active: Replicated::new(false),
            browse: BrowseState::default(),
        }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_slot(&self) -> usize {
        self.active_slot.get()
    }

    pub fn equipment_active(&self) -> bool {
        self.equipment_active.get()
    }

    pub fn browse(&self) -> BrowseState {
        self.browse
    }

    /// Item occupying `slot`, deployed or not.
    pub fn item_at(&self, slot: usize) -> Option<&T> {
        self.items.iter().find(|item| item.slot_index() == slot)
    }

    /// Item at the active slot currently held by the active actor.
    pub fn active_item(&self, ctx: &PlayerContext) -> Option<&T> {
        if !self.equipment_active() {
            return None;
        }
        self.deployed_index(self.active_slot(), ctx)
            .map(|index| &self.items[index])
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Instantiates every template, holsters it and orders the slots.
    ///
    /// Order: tools first, then by descending positive drop chance; items
    /// that never drop go last. Calling this twice duplicates the items.
    pub fn initialize<F>(
        &mut self,
        templates: &[ItemTemplate],
        factory: &mut F,
        ctx: &PlayerContext,
        config: &CombatConfig,
        out: &mut Outbox,
    ) -> Result<(), InventoryError>
    where
        F: EquipmentFactory<Item = T>,
    {
        self.set_equipment_active(false, out);

        if !ctx.valid {
            return Err(InventoryError::SetupFailure {
                player: self.owner,
                reason: "owning player is invalid",
            });
        }

        for template in templates {
            let Some(mut item) = factory.instantiate(template) else {
                return Err(InventoryError::SetupFailure {
                    player: self.owner,
                    reason: "equipment instance failed to materialize",
                });
            };

            if config.infinite_ammo {
                item.set_ammo(CombatConfig::UNLIMITED_AMMO);
            }
            item.set_slot_index(self.items.len());
            item.initialize(self.owner);
            item.holster();
            self.items.push(item);
        }

        self.items.sort_by(slot_order);
        for (slot, item) in self.items.iter_mut().enumerate() {
            item.set_slot_index(slot);
        }

        Ok(())
    }

    /// Destroys every item. Returns the ids that were removed.
    pub fn cleanup(&mut self, out: &mut Outbox) -> Vec<ItemId> {
        self.set_equipment_active(false, out);
        self.items.drain(..).map(|item| item.id()).collect()
    }

    // ========================================================================
    // Equip / holster
    // ========================================================================

    /// Swaps to `item` on behalf of the owner (inventory UI selection).
    pub fn equip_item(
        &mut self,
        item: ItemId,
        ctx: &PlayerContext,
        mounts: &mut impl MountControl,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        if ctx.has_acted_this_turn {
            return Err(InventoryError::TurnViolation {
                player: self.owner,
                reason: "already acted this turn",
            });
        }
        self.ensure_swappable(ctx)?;

        let Some(slot) = self
            .items
            .iter()
            .find(|candidate| candidate.id() == item)
            .map(Equippable::slot_index)
        else {
            return Err(InventoryError::UnknownItem {
                player: self.owner,
                item,
            });
        };

        self.holster_active(ctx, mounts, out)?;
        self.set_active_slot(slot, out);
        self.equip(slot, ctx, out)?;
        self.set_browse_open(false, out);
        Ok(())
    }

    /// Deploys the item at `slot` to the active actor (broadcast).
    pub fn equip(
        &mut self,
        slot: usize,
        ctx: &PlayerContext,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        if !ctx.is_active_player {
            return Err(InventoryError::TurnViolation {
                player: self.owner,
                reason: "not the active player",
            });
        }

        let Some(index) = self.items.iter().position(|item| item.slot_index() == slot) else {
            return Err(InventoryError::EmptySlot {
                player: self.owner,
                slot,
            });
        };

        let Some(target) = ctx.active_actor.filter(|_| ctx.valid) else {
            return Err(InventoryError::InvalidPlayer { player: self.owner });
        };

        for (other_index, other) in self.items.iter_mut().enumerate() {
            if other_index != index && other.carrier().is_some() {
                other.holster();
                out.equipment(EquipmentEvent::Holstered {
                    player: self.owner,
                    item: other.id(),
                    slot: other.slot_index(),
                });
            }
        }

        self.set_equipment_active(true, out);
        let item = &mut self.items[index];
        item.deploy(target);
        out.equipment(EquipmentEvent::Deployed {
            player: self.owner,
            item: item.id(),
            slot,
            carrier: target,
        });
        Ok(())
    }

    /// Holsters the item at `slot` if the active actor holds it (broadcast).
    pub fn holster(
        &mut self,
        slot: usize,
        ctx: &PlayerContext,
        mounts: &mut impl MountControl,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        if !ctx.valid {
            return Err(InventoryError::InvalidPlayer { player: self.owner });
        }

        let Some(index) = self.deployed_index(slot, ctx) else {
            return Ok(());
        };

        self.set_equipment_active(false, out);
        if let Some(carrier) = self.items[index].carrier() {
            mounts.dismount(carrier, out);
        }

        let item = &mut self.items[index];
        item.holster();
        out.equipment(EquipmentEvent::Holstered {
            player: self.owner,
            item: item.id(),
            slot,
        });
        Ok(())
    }

    pub fn holster_active(
        &mut self,
        ctx: &PlayerContext,
        mounts: &mut impl MountControl,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        self.holster(self.active_slot(), ctx, mounts, out)
    }

    // ========================================================================
    // Cycling
    // ========================================================================

    pub fn next_slot(&self) -> usize {
        let active = self.active_slot();
        if active + 1 >= self.items.len() {
            0
        } else {
            active + 1
        }
    }

    pub fn prev_slot(&self) -> usize {
        let last = self.items.len().saturating_sub(1);
        match self.active_slot() {
            0 => last,
            active => (active - 1).min(last),
        }
    }

    /// Moves to the next (or previous) slot with wraparound and equips it.
    pub fn cycle_slot(
        &mut self,
        forward: bool,
        ctx: &PlayerContext,
        mounts: &mut impl MountControl,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        if self.items.is_empty() {
            return Err(InventoryError::EmptySlot {
                player: self.owner,
                slot: self.active_slot(),
            });
        }
        self.ensure_swappable(ctx)?;

        self.holster_active(ctx, mounts, out)?;
        let slot = if forward {
            self.next_slot()
        } else {
            self.prev_slot()
        };
        self.set_active_slot(slot, out);
        self.equip(slot, ctx, out)
    }

    /// Applies one update worth of input intents.
    pub fn poll(
        &mut self,
        frame: &InputFrame,
        ctx: &PlayerContext,
        mounts: &mut impl MountControl,
        out: &mut Outbox,
    ) -> Result<(), InventoryError> {
        if frame.toggle_inventory {
            self.set_browse_open(!self.browse.open, out);
        }

        if frame.using_controller && self.browse.open && frame.close_gesture_released {
            self.set_browse_open(false, out);
            self.browse.closing = true;
            return Ok(());
        }

        let next = if frame.cycle_next {
            self.cycle_slot(true, ctx, mounts, out)
        } else {
            Ok(())
        };
        let previous = if frame.cycle_previous {
            self.cycle_slot(false, ctx, mounts, out)
        } else {
            Ok(())
        };

        self.browse.closing = false;
        next.and(previous)
    }

    // ========================================================================
    // Usage
    // ========================================================================

    /// Records weapon usage reported for the item at `slot`.
    pub fn record_use(&mut self, slot: usize, phase: UsePhase) -> Result<(), InventoryError> {
        let Some(item) = self.items.iter_mut().find(|item| item.slot_index() == slot) else {
            return Err(InventoryError::EmptySlot {
                player: self.owner,
                slot,
            });
        };

        match phase {
            UsePhase::Started => {
                if let Some(usage) = item.usage_mut() {
                    usage.is_firing = true;
                }
            }
            UsePhase::Finished => {
                if let Some(usage) = item.usage_mut() {
                    usage.is_firing = false;
                    usage.times_used += 1;
                }
                if item.ammo() > 0 {
                    item.set_ammo(item.ammo() - 1);
                }
            }
        }
        Ok(())
    }

    /// Clears per-turn usage on every item.
    pub fn reset_usage(&mut self) {
        for usage in self.items.iter_mut().filter_map(Equippable::usage_mut) {
            usage.is_firing = false;
            usage.times_used = 0;
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn deployed_index(&self, slot: usize, ctx: &PlayerContext) -> Option<usize> {
        if !ctx.valid {
            return None;
        }
        let carrier = ctx.active_actor?;
        self.items
            .iter()
            .position(|item| item.slot_index() == slot && item.carrier() == Some(carrier))
    }

    fn ensure_swappable(&self, ctx: &PlayerContext) -> Result<(), InventoryError> {
        match self.active_item(ctx) {
            Some(item) if item.usage().is_some_and(|usage| usage.blocks_swap()) => {
                Err(InventoryError::SwapBlocked {
                    player: self.owner,
                    item: item.id(),
                })
            }
            _ => Ok(()),
        }
    }

    fn set_active_slot(&mut self, slot: usize, out: &mut Outbox) {
        if self.active_slot.set(slot) {
            out.replicate(ReplicaKey::ActiveSlot(self.owner), &self.active_slot);
        }
    }

    fn set_equipment_active(&mut self, active: bool, out: &mut Outbox) {
        if self.equipment_active.set(active) {
            out.replicate(
                ReplicaKey::EquipmentActive(self.owner),
                &self.equipment_active,
            );
        }
    }

    fn set_browse_open(&mut self, open: bool, out: &mut Outbox) {
        if self.browse.open != open {
            self.browse.open = open;
            out.equipment(EquipmentEvent::BrowseToggled {
                player: self.owner,
                open,
            });
        }
    }
}

/// Tools first, then positive drop chance descending, then the rest.
fn slot_order<T: Equippable>(a: &T, b: &T) -> Ordering {
    let not_tool = |item: &T| item.category() != EquipmentCategory::Tool;
    let priority = |item: &T| Some(item.drop_chance()).filter(|chance| *chance > 0.0);

    not_tool(a)
        .cmp(&not_tool(b))
        .then_with(|| match (priority(a), priority(b)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::item::{SwapRules, TemplateFactory};
    use crate::outbound::Outbound;

    const OWNER: PlayerId = PlayerId(1);
    const GRUB: ActorId = ActorId(40);

    fn ctx() -> PlayerContext {
        PlayerContext {
            player: OWNER,
            valid: true,
            is_active_player: true,
            has_acted_this_turn: false,
            active_actor: Some(GRUB),
        }
    }

    fn weapon(name: &str, drop_chance: f32) -> ItemTemplate {
        ItemTemplate::new(name, EquipmentCategory::Weapon)
            .with_drop_chance(drop_chance)
            .with_swap_rules(SwapRules::default())
    }

    fn setup(templates: &[ItemTemplate]) -> Inventory {
        let mut next_id = 1;
        let mut inventory = Inventory::new(OWNER);
        inventory
            .initialize(
                templates,
                &mut TemplateFactory::new(&mut next_id),
                &ctx(),
                &CombatConfig::default(),
                &mut Outbox::new(),
            )
            .expect("setup succeeds");
        inventory
    }

    fn deployed(inventory: &Inventory) -> Vec<usize> {
        inventory
            .items()
            .iter()
            .filter(|item| item.carrier.is_some())
            .map(|item| item.slot_index)
            .collect()
    }

    #[test]
    fn initialize_orders_tools_then_drop_priority() {
        let inventory = setup(&[
            weapon("grenade", 0.0),
            ItemTemplate::new("rope", EquipmentCategory::Tool),
            weapon("bazooka", 5.0),
        ]);

        let names: Vec<&str> = inventory.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["rope", "bazooka", "grenade"]);
        let slots: Vec<usize> = inventory.items().iter().map(|i| i.slot_index).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert!(inventory.items().iter().all(|i| i.owner == Some(OWNER)));
        assert!(deployed(&inventory).is_empty());
    }

    #[test]
    fn higher_drop_chance_sorts_first() {
        let inventory = setup(&[weapon("a", 1.0), weapon("b", 9.0), weapon("c", 3.0)]);
        let names: Vec<&str> = inventory.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn infinite_ammo_overrides_templates() {
        let mut next_id = 1;
        let mut inventory = Inventory::new(OWNER);
        inventory
            .initialize(
                &[weapon("shotgun", 1.0).with_ammo(2)],
                &mut TemplateFactory::new(&mut next_id),
                &ctx(),
                &CombatConfig::default().with_infinite_ammo(true),
                &mut Outbox::new(),
            )
            .unwrap();
        assert!(inventory.items()[0].has_unlimited_ammo());
    }

    #[test]
    fn setup_aborts_on_failed_instance() {
        let mut next_id = 1;
        let mut inventory: Inventory = Inventory::new(OWNER);
        let result = inventory.initialize(
            &[weapon("uzi", 1.0), weapon("", 1.0), weapon("sheep", 1.0)],
            &mut TemplateFactory::new(&mut next_id),
            &ctx(),
            &CombatConfig::default(),
            &mut Outbox::new(),
        );

        assert!(matches!(result, Err(InventoryError::SetupFailure { .. })));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn setup_rejects_invalid_player() {
        let mut next_id = 1;
        let mut inventory: Inventory = Inventory::new(OWNER);
        let invalid = PlayerContext {
            valid: false,
            ..ctx()
        };
        let result = inventory.initialize(
            &[weapon("uzi", 1.0)],
            &mut TemplateFactory::new(&mut next_id),
            &invalid,
            &CombatConfig::default(),
            &mut Outbox::new(),
        );
        assert!(matches!(result, Err(InventoryError::SetupFailure { .. })));
        assert!(inventory.is_empty());
    }

    #[test]
    fn equip_item_holsters_previous_first() {
        let mut inventory = setup(&[weapon("a", 3.0), weapon("b", 2.0)]);
        let mut out = Outbox::new();
        let first = inventory.items()[0].id;
        let second = inventory.items()[1].id;

        inventory.equip_item(first, &ctx(), &mut NoMounts, &mut out).unwrap();
        inventory.equip_item(second, &ctx(), &mut NoMounts, &mut out).unwrap();

        assert_eq!(inventory.active_slot(), 1);
        assert!(inventory.equipment_active());
        assert_eq!(deployed(&inventory), vec![1]);

        let events: Vec<&EquipmentEvent> = out
            .iter()
            .filter_map(|m| match m {
                Outbound::Equipment(event) => Some(event),
                _ => None,
            })
            .collect();
        assert!(matches!(events[0], EquipmentEvent::Deployed { slot: 0, .. }));
        assert!(matches!(events[1], EquipmentEvent::Holstered { slot: 0, .. }));
        assert!(matches!(events[2], EquipmentEvent::Deployed { slot: 1, .. }));
    }

    #[test]
    fn equip_item_closes_browser() {
        let mut inventory = setup(&[weapon("a", 3.0)]);
        let mut out = Outbox::new();
        inventory
            .poll(&InputFrame::toggle(), &ctx(), &mut NoMounts, &mut out)
            .unwrap();
        assert!(inventory.browse().open);

        let id = inventory.items()[0].id;
        inventory.equip_item(id, &ctx(), &mut NoMounts, &mut out).unwrap();
        assert!(!inventory.browse().open);
    }

    #[test]
    fn equip_item_is_refused_after_acting() {
        let mut inventory = setup(&[weapon("a", 3.0), weapon("b", 2.0)]);
        let acted = PlayerContext {
            has_acted_this_turn: true,
            ..ctx()
        };
        let id = inventory.items()[1].id;
        let result = inventory.equip_item(id, &acted, &mut NoMounts, &mut Outbox::new());

        assert!(matches!(result, Err(InventoryError::TurnViolation { .. })));
        assert_eq!(inventory.active_slot(), 0);
        assert!(!inventory.equipment_active());
    }

    #[test]
    fn equip_requires_active_player() {
        let mut inventory = setup(&[weapon("a", 3.0)]);
        let idle = PlayerContext {
            is_active_player: false,
            ..ctx()
        };
        let result = inventory.equip(0, &idle, &mut Outbox::new());
        assert!(matches!(result, Err(InventoryError::TurnViolation { .. })));
        assert!(deployed(&inventory).is_empty());
    }

    #[test]
    fn equip_empty_slot_is_reported() {
        let mut inventory = setup(&[weapon("a", 3.0)]);
        let result = inventory.equip(4, &ctx(), &mut Outbox::new());
        assert_eq!(
            result,
            Err(InventoryError::EmptySlot {
                player: OWNER,
                slot: 4
            })
        );
    }

    #[test]
    fn holster_without_deployed_item_is_noop() {
        let mut inventory = setup(&[weapon("a", 3.0)]);
        let mut out = Outbox::new();
        inventory.holster(0, &ctx(), &mut NoMounts, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn holster_dismounts_carrier() {
        struct Recorder(Vec<ActorId>);
        impl MountControl for Recorder {
            fn dismount(&mut self, carrier: ActorId, _out: &mut Outbox) {
                self.0.push(carrier);
            }
        }

        let mut inventory = setup(&[weapon("a", 3.0)]);
        let mut out = Outbox::new();
        inventory.equip(0, &ctx(), &mut out).unwrap();

        let mut mounts = Recorder(Vec::new());
        inventory.holster_active(&ctx(), &mut mounts, &mut out).unwrap();

        assert_eq!(mounts.0, vec![GRUB]);
        assert!(!inventory.equipment_active());
        assert!(deployed(&inventory).is_empty());
    }

    #[test]
    fn cycling_forward_wraps_around() {
        let mut inventory = setup(&[weapon("a", 4.0), weapon("b", 3.0), weapon("c", 2.0)]);
        let mut out = Outbox::new();
        let start = inventory.active_slot();

        let mut visited = Vec::new();
        for _ in 0..inventory.len() {
            inventory.cycle_slot(true, &ctx(), &mut NoMounts, &mut out).unwrap();
            visited.push(inventory.active_slot());
            assert!(deployed(&inventory).len() <= 1);
        }

        assert_eq!(visited, vec![1, 2, 0]);
        assert_eq!(inventory.active_slot(), start);
    }

    #[test]
    fn cycling_backward_wraps_to_last() {
        let mut inventory = setup(&[weapon("a", 4.0), weapon("b", 3.0), weapon("c", 2.0)]);
        inventory
            .cycle_slot(false, &ctx(), &mut NoMounts, &mut Outbox::new())
            .unwrap();
        assert_eq!(inventory.active_slot(), 2);
        assert_eq!(deployed(&inventory), vec![2]);
    }

    #[test]
    fn firing_weapon_blocks_swaps() {
        let mut inventory = setup(&[weapon("a", 4.0), weapon("b", 3.0)]);
        let mut out = Outbox::new();
        inventory.equip(0, &ctx(), &mut out).unwrap();
        inventory.record_use(0, UsePhase::Started).unwrap();

        let cycled = inventory.cycle_slot(true, &ctx(), &mut NoMounts, &mut out);
        assert!(matches!(cycled, Err(InventoryError::SwapBlocked { .. })));

        let id = inventory.items()[1].id;
        let equipped = inventory.equip_item(id, &ctx(), &mut NoMounts, &mut out);
        assert!(matches!(equipped, Err(InventoryError::SwapBlocked { .. })));

        assert_eq!(inventory.active_slot(), 0);
        assert_eq!(deployed(&inventory), vec![0]);
    }

    #[test]
    fn used_weapon_blocks_until_reset() {
        let mut inventory = setup(&[weapon("a", 4.0).with_ammo(3), weapon("b", 3.0)]);
        let mut out = Outbox::new();
        inventory.equip(0, &ctx(), &mut out).unwrap();
        inventory.record_use(0, UsePhase::Started).unwrap();
        inventory.record_use(0, UsePhase::Finished).unwrap();

        assert_eq!(inventory.items()[0].ammo, 2);
        assert!(inventory.cycle_slot(true, &ctx(), &mut NoMounts, &mut out).is_err());

        inventory.reset_usage();
        inventory.cycle_slot(true, &ctx(), &mut NoMounts, &mut out).unwrap();
        assert_eq!(inventory.active_slot(), 1);
    }

    #[test]
    fn controller_close_sets_closing_for_one_poll() {
        let mut inventory = setup(&[weapon("a", 4.0), weapon("b", 3.0)]);
        let mut out = Outbox::new();
        inventory
            .poll(&InputFrame::toggle(), &ctx(), &mut NoMounts, &mut out)
            .unwrap();

        let close = InputFrame {
            cycle_next: true,
            ..InputFrame::controller_close()
        };
        inventory.poll(&close, &ctx(), &mut NoMounts, &mut out).unwrap();
        assert!(!inventory.browse().open);
        assert!(inventory.browse().closing);
        // The close gesture swallows the rest of the frame.
        assert_eq!(inventory.active_slot(), 0);

        inventory
            .poll(&InputFrame::default(), &ctx(), &mut NoMounts, &mut out)
            .unwrap();
        assert!(!inventory.browse().closing);
    }

    #[test]
    fn cleanup_returns_destroyed_ids() {
        let mut inventory = setup(&[weapon("a", 4.0), weapon("b", 3.0)]);
        let ids: Vec<ItemId> = inventory.items().iter().map(|i| i.id).collect();
        let removed = inventory.cleanup(&mut Outbox::new());
        assert_eq!(removed, ids);
        assert!(inventory.is_empty());
    }
}
