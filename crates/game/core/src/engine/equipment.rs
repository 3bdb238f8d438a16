//! Inventory operations routed through the engine.
//!
//! The engine supplies each request with a fresh [`PlayerContext`] built from
//! turn state, so guards see the same facts on every observer.

use std::collections::BTreeMap;

use tracing::warn;

use super::CombatEngine;
use crate::equipment::{
    EquipmentItem, InputFrame, Inventory, InventoryError, ItemTemplate, MountControl,
    PlayerContext, TemplateFactory, UsePhase,
};
use crate::error::log_error;
use crate::outbound::{EquipmentEvent, Outbound, Outbox};
use crate::state::{ActorId, ActorState, ItemId, MatchState, PlayerId};

/// Dismounts carriers by clearing their `mounted_on` link.
struct ActorMounts<'s> {
    actors: &'s mut BTreeMap<ActorId, ActorState>,
}

impl MountControl for ActorMounts<'_> {
    fn dismount(&mut self, carrier: ActorId, out: &mut Outbox) {
        if let Some(actor) = self.actors.get_mut(&carrier)
            && let Some(mount) = actor.mounted_on.take()
        {
            out.equipment(EquipmentEvent::Dismounted {
                actor: carrier,
                mount,
            });
        }
    }
}

impl CombatEngine<'_> {
    /// One-time loadout setup for `player`. Re-invoking duplicates items.
    pub fn initialize_inventory(
        &mut self,
        player: PlayerId,
        templates: &[ItemTemplate],
    ) -> Vec<Outbound> {
        self.run(|engine, out| {
            let ctx = engine.state.player_context(player);
            let config = engine.config;
            let mut next_id = *engine.state.item_counter();

            let result = match engine.state.players.get_mut(&player) {
                Some(state) => state.inventory.initialize(
                    templates,
                    &mut TemplateFactory::new(&mut next_id),
                    &ctx,
                    config,
                    out,
                ),
                None => Err(InventoryError::SetupFailure {
                    player,
                    reason: "owning player is not registered",
                }),
            };

            *engine.state.item_counter() = next_id;
            if let Err(error) = result {
                log_error("initialize_inventory", &error);
            }
        })
    }

    /// Owner-initiated swap to a specific item.
    pub fn equip_item(&mut self, player: PlayerId, item: ItemId) -> Vec<Outbound> {
        self.run(|engine, out| {
            engine.with_inventory(player, "equip_item", out, |inventory, ctx, mounts, out| {
                inventory.equip_item(item, ctx, mounts, out)
            });
        })
    }

    pub fn equip(&mut self, player: PlayerId, slot: usize) -> Vec<Outbound> {
        self.run(|engine, out| {
            engine.with_inventory(player, "equip", out, |inventory, ctx, _, out| {
                inventory.equip(slot, ctx, out)
            });
        })
    }

    pub fn holster(&mut self, player: PlayerId, slot: usize) -> Vec<Outbound> {
        self.run(|engine, out| {
            engine.with_inventory(player, "holster", out, |inventory, ctx, mounts, out| {
                inventory.holster(slot, ctx, mounts, out)
            });
        })
    }

    pub fn holster_active(&mut self, player: PlayerId) -> Vec<Outbound> {
        self.run(|engine, out| engine.holster_for(player, out))
    }

    pub fn cycle_slot(&mut self, player: PlayerId, forward: bool) -> Vec<Outbound> {
        self.run(|engine, out| {
            engine.with_inventory(player, "cycle_slot", out, |inventory, ctx, mounts, out| {
                inventory.cycle_slot(forward, ctx, mounts, out)
            });
        })
    }

    /// Applies one update's worth of input intents from the owning session.
    pub fn poll_input(&mut self, player: PlayerId, frame: InputFrame) -> Vec<Outbound> {
        self.run(|engine, out| {
            engine.with_inventory(player, "poll_input", out, |inventory, ctx, mounts, out| {
                inventory.poll(&frame, ctx, mounts, out)
            });
        })
    }

    /// Usage reported by the weapon collaborator. A finished use ends the
    /// player's free swaps for this turn.
    pub fn record_item_use(
        &mut self,
        player: PlayerId,
        slot: usize,
        phase: UsePhase,
    ) -> Vec<Outbound> {
        self.run(|engine, out| {
            let recorded =
                engine.with_inventory(player, "record_item_use", out, |inventory, _, _, _| {
                    inventory.record_use(slot, phase)
                });
            if recorded
                && phase == UsePhase::Finished
                && let Some(state) = engine.state.players.get_mut(&player)
            {
                state.has_acted_this_turn = true;
            }
        })
    }

    pub(super) fn holster_for(&mut self, player: PlayerId, out: &mut Outbox) {
        self.with_inventory(player, "holster_active", out, |inventory, ctx, mounts, out| {
            inventory.holster_active(ctx, mounts, out)
        });
    }

    /// Runs `f` against the player's inventory. Returns `false` when the
    /// player is unknown or `f` failed.
    fn with_inventory<F>(
        &mut self,
        player: PlayerId,
        operation: &'static str,
        out: &mut Outbox,
        f: F,
    ) -> bool
    where
        F: FnOnce(
            &mut Inventory<EquipmentItem>,
            &PlayerContext,
            &mut ActorMounts<'_>,
            &mut Outbox,
        ) -> Result<(), InventoryError>,
    {
        let ctx = self.state.player_context(player);
        let MatchState {
            actors, players, ..
        } = &mut *self.state;

        let Some(state) = players.get_mut(&player) else {
            warn!(%player, operation, "inventory request for unknown player");
            return false;
        };

        let mut mounts = ActorMounts { actors };
        match f(&mut state.inventory, &ctx, &mut mounts, out) {
            Ok(()) => true,
            Err(error) => {
                log_error(operation, &error);
                false
            }
        }
    }
}
