//! Death sequence driver.
//!
//! Entry happens from the damage path; the two timed stages come back from
//! the runtime's timers through [`CombatEngine::death_stage`]. Every stage
//! re-checks that the actor still exists and sits in the expected phase.

use tracing::{debug, info};

use super::CombatEngine;
use crate::combat::{
    DeathPhase, DeathReason, DeathStage, RemovalMode, blast_for, grave_position, marker_position,
};
use crate::outbound::{EffectRequest, Outbound, Outbox};
use crate::state::ActorId;

impl CombatEngine<'_> {
    /// Delivers a timer-scheduled death stage. Stale deliveries are dropped.
    pub fn death_stage(&mut self, actor: ActorId, stage: DeathStage) -> Vec<Outbound> {
        self.run(|engine, out| engine.advance_death(actor, stage, out))
    }

    pub(super) fn start_death(&mut self, id: ActorId, removal: RemovalMode, out: &mut Outbox) {
        let Some(actor) = self.state.actors.get_mut(&id) else {
            return;
        };
        if !actor.death.is_alive() || actor.health.death_invoked() {
            debug!(actor = %id, "death sequence already running");
            return;
        }

        actor.death = DeathPhase::LethalDetected { removal };
        if !actor.is_character() || removal == RemovalMode::Immediate {
            self.finish_death(id, out);
            return;
        }

        out.push(Outbound::ScheduleDeathStage {
            actor: id,
            stage: DeathStage::Grace,
            delay_ms: self.config.death_grace_ms,
        });
    }

    fn advance_death(&mut self, id: ActorId, stage: DeathStage, out: &mut Outbox) {
        let accepted = self
            .state
            .actor(id)
            .is_some_and(|actor| actor.death.accepts(stage));
        if !accepted {
            debug!(actor = %id, %stage, "dropping stale death stage");
            return;
        }

        match stage {
            DeathStage::Grace => self.stage_effects(id, out),
            DeathStage::Detonate => self.detonate(id, out),
        }
    }

    /// Sets the death guard and spawns the pre-explosion marker.
    fn stage_effects(&mut self, id: ActorId, out: &mut Outbox) {
        let marker = self.state.allocate_marker();
        let Some(actor) = self.state.actors.get_mut(&id) else {
            return;
        };

        actor.health.mark_death_invoked(id, out);
        let position = actor.position;
        out.effect(EffectRequest::MarkerSpawned {
            marker,
            position: marker_position(position, actor.facing, self.config),
        });
        actor.death = DeathPhase::EffectsStaged { marker, position };

        out.push(Outbound::ScheduleDeathStage {
            actor: id,
            stage: DeathStage::Detonate,
            delay_ms: self.config.detonation_delay_ms,
        });
    }

    fn detonate(&mut self, id: ActorId, out: &mut Outbox) {
        let config = self.config;
        let Some(actor) = self.state.actor(id) else {
            return;
        };
        let DeathPhase::EffectsStaged { marker, position } = actor.death else {
            return;
        };

        let from_disconnect = actor
            .death_reason
            .as_ref()
            .is_some_and(|reason| reason.from_disconnect);
        let blast = blast_for(from_disconnect, config);

        out.effect(EffectRequest::Particles {
            position,
            scale: config.death_particle_scale,
        });
        out.effect(EffectRequest::Sound {
            cue: config.death_sound.clone(),
            position,
        });
        out.effect(EffectRequest::Explosion {
            position,
            radius: blast.radius,
            force: blast.force,
            source: id,
        });
        out.effect(EffectRequest::MarkerDestroyed { marker });
        out.effect(EffectRequest::GraveSpawned {
            position: grave_position(position, config),
        });

        self.finish_death(id, out);
    }

    /// Final stage shared by every removal path.
    fn finish_death(&mut self, id: ActorId, out: &mut Outbox) {
        let Some(actor) = self.state.actor(id) else {
            return;
        };
        let owner = actor.owner();

        if let Some(owner) = owner {
            let reason = actor
                .death_reason
                .clone()
                .unwrap_or_else(|| DeathReason::unattributed(id));
            let message = reason.describe(|actor| self.state.actor_name(actor));
            info!(actor = %id, killer = %reason.attacker_id, "{message}");

            out.push(Outbound::DeathMessage(message));
            out.push(Outbound::KillCredited {
                victim: id,
                killer: reason.attacker_id,
            });
            self.holster_for(owner, out);
            out.push(Outbound::ActorDestroyed { actor: id });
        }

        out.push(Outbound::ObjectDied { actor: id });

        let Some(actor) = self.state.actors.get_mut(&id) else {
            return;
        };
        actor.health.mark_death_invoked(id, out);

        if actor.on_death.explode {
            out.push(Outbound::ExplodeOnDeath { actor: id });
        }
        if actor.on_death.proximity_detonate && !actor.on_death.detonating {
            actor.on_death.detonating = true;
            out.push(Outbound::ProximityDetonationStarted { actor: id });
        }
        actor.death = DeathPhase::Removed;

        if let Some(owner) = owner {
            self.state.actors.remove(&id);
            if let Some(player) = self.state.players.get_mut(&owner) {
                player.release_actor(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageInfo, tags};
    use crate::config::CombatConfig;
    use crate::engine::fixtures::*;
    use crate::equipment::{EquipmentCategory, ItemTemplate};
    use crate::outbound::EquipmentEvent;
    use crate::state::{ActorSpec, Facing, MarkerId, OnDeath, Vec3};

    fn effects(messages: &[Outbound]) -> Vec<&EffectRequest> {
        messages
            .iter()
            .filter_map(|m| match m {
                Outbound::Effect(effect) => Some(effect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn staged_sequence_runs_grace_then_detonate() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        state.actors.get_mut(&BOB_GRUB).unwrap().position = Vec3::new(200.0, 10.0, 50.0);
        let mut engine = CombatEngine::new(&mut state, &config);

        let lethal = engine.report_damage(BOB_GRUB, DamageInfo::new(150.0, Some(ALICE_GRUB)), true);
        assert_eq!(scheduled(&lethal), vec![(BOB_GRUB, DeathStage::Grace, 500)]);
        assert!(!engine.state().actor(BOB_GRUB).unwrap().health.death_invoked());

        let grace = engine.death_stage(BOB_GRUB, DeathStage::Grace);
        assert!(engine.state().actor(BOB_GRUB).unwrap().health.death_invoked());
        assert_eq!(scheduled(&grace), vec![(BOB_GRUB, DeathStage::Detonate, 750)]);
        assert_eq!(
            effects(&grace),
            vec![&EffectRequest::MarkerSpawned {
                marker: MarkerId(1),
                position: Vec3::new(200.0, 10.0, 50.0)
            }]
        );

        let detonate = engine.death_stage(BOB_GRUB, DeathStage::Detonate);
        let staged = effects(&detonate);
        assert!(staged.contains(&&EffectRequest::Explosion {
            position: Vec3::new(200.0, 10.0, 50.0),
            radius: 75.0,
            force: 25.0,
            source: BOB_GRUB
        }));
        assert!(staged.contains(&&EffectRequest::MarkerDestroyed { marker: MarkerId(1) }));
        assert!(staged.contains(&&EffectRequest::GraveSpawned {
            position: Vec3::new(200.0, 536.0, 74.0)
        }));
        assert!(detonate.contains(&Outbound::KillCredited {
            victim: BOB_GRUB,
            killer: ALICE_GRUB
        }));
        assert!(detonate.contains(&Outbound::DeathMessage(
            "Bob's grub was killed by Alice's grub.".to_owned()
        )));
        assert!(detonate.contains(&Outbound::ActorDestroyed { actor: BOB_GRUB }));
        assert!(detonate.contains(&Outbound::ObjectDied { actor: BOB_GRUB }));

        assert!(engine.state().actor(BOB_GRUB).is_none());
        assert!(engine.state().player(BOB).unwrap().actors.is_empty());
    }

    #[test]
    fn left_facing_marker_is_offset() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let grub = state.actors.get_mut(&BOB_GRUB).unwrap();
        grub.position = Vec3::new(100.0, 0.0, 0.0);
        grub.facing = Facing::Left;
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.report_damage(BOB_GRUB, DamageInfo::new(100.0, None), true);
        let grace = engine.death_stage(BOB_GRUB, DeathStage::Grace);

        assert!(matches!(
            effects(&grace)[..],
            [EffectRequest::MarkerSpawned { position, .. }] if position.x == 70.0
        ));
    }

    #[test]
    fn stages_for_despawned_actor_are_dropped() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.report_damage(BOB_GRUB, DamageInfo::new(100.0, None), true);
        engine.despawn(BOB_GRUB);

        assert!(engine.death_stage(BOB_GRUB, DeathStage::Grace).is_empty());
        assert!(engine.death_stage(BOB_GRUB, DeathStage::Detonate).is_empty());
    }

    #[test]
    fn duplicate_or_out_of_order_stages_are_dropped() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.report_damage(BOB_GRUB, DamageInfo::new(100.0, None), true);
        assert!(engine.death_stage(BOB_GRUB, DeathStage::Detonate).is_empty());
        assert!(!engine.death_stage(BOB_GRUB, DeathStage::Grace).is_empty());
        assert!(engine.death_stage(BOB_GRUB, DeathStage::Grace).is_empty());
        assert!(engine.death_stage(ALICE_GRUB, DeathStage::Grace).is_empty());
    }

    #[test]
    fn self_inflicted_kill_zone_death_is_immediate() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        let out = engine.report_damage(
            ALICE_GRUB,
            DamageInfo::new(100.0, None).with_tag(tags::KILL_ZONE),
            true,
        );

        assert!(effects(&out).is_empty());
        assert!(out.contains(&Outbound::KillCredited {
            victim: ALICE_GRUB,
            killer: ALICE_GRUB
        }));
        assert!(out.contains(&Outbound::DeathMessage(
            "Alice's grub fell out of the world.".to_owned()
        )));
        assert!(engine.state().actor(ALICE_GRUB).is_none());
    }

    #[test]
    fn death_holsters_the_owners_active_item() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        engine.initialize_inventory(
            ALICE,
            &[ItemTemplate::new("bazooka", EquipmentCategory::Weapon)],
        );
        engine.equip(ALICE, 0);
        assert!(engine.state().player(ALICE).unwrap().inventory.equipment_active());

        let out = engine.report_damage(
            ALICE_GRUB,
            DamageInfo::new(100.0, None).with_tag(tags::KILL_ZONE),
            true,
        );

        let holstered = out.iter().position(|m| {
            matches!(m, Outbound::Equipment(EquipmentEvent::Holstered { slot: 0, .. }))
        });
        let destroyed = out
            .iter()
            .position(|m| *m == Outbound::ActorDestroyed { actor: ALICE_GRUB });
        assert!(holstered.is_some());
        assert!(holstered < destroyed);
        assert!(!engine.state().player(ALICE).unwrap().inventory.equipment_active());
    }

    #[test]
    fn objects_skip_character_stages() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let mine = ActorId(50);
        engine.spawn_actor(ActorSpec::object(mine, "mine", 1.0).with_on_death(OnDeath {
            explode: true,
            proximity_detonate: true,
            detonating: false,
        }));

        let out = engine.report_damage(mine, DamageInfo::new(5.0, Some(ALICE_GRUB)), false);

        assert!(scheduled(&out).is_empty());
        assert_eq!(count(&out, |m| matches!(m, Outbound::ActorDied { .. })), 0);
        assert_eq!(count(&out, |m| matches!(m, Outbound::ActorDestroyed { .. })), 0);
        assert!(out.contains(&Outbound::ObjectDied { actor: mine }));
        assert!(out.contains(&Outbound::ExplodeOnDeath { actor: mine }));
        assert!(out.contains(&Outbound::ProximityDetonationStarted { actor: mine }));

        let mine_state = engine.state().actor(mine).unwrap();
        assert!(mine_state.health.death_invoked());
        assert!(mine_state.on_death.detonating);
        assert_eq!(mine_state.death, DeathPhase::Removed);

        let again = engine.report_damage(mine, DamageInfo::new(5.0, None), false);
        assert_eq!(count(&again, |m| matches!(m, Outbound::ObjectDied { .. })), 0);
    }
}
