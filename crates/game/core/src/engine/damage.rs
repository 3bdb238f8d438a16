//! Damage reporting, queue flushing and healing.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use super::CombatEngine;
use crate::combat::{CombatError, DamageInfo, DeathReason, RemovalMode};
use crate::error::log_error;
use crate::outbound::{Outbound, Outbox};
use crate::state::ActorId;

impl CombatEngine<'_> {
    /// Reports damage against `actor`.
    ///
    /// Characters queue the damage until their owning session flushes, unless
    /// `immediate` is set. Objects always apply it at once.
    pub fn report_damage(
        &mut self,
        actor: ActorId,
        info: DamageInfo,
        immediate: bool,
    ) -> Vec<Outbound> {
        self.run(|engine, out| engine.report(actor, info, immediate, out))
    }

    /// Applies every queued damage event of `actor` as one subtraction.
    pub fn flush_queue(&mut self, actor: ActorId) -> Vec<Outbound> {
        self.run(|engine, out| engine.flush(actor, out))
    }

    /// Adds `amount` to the actor's health. Overheal is allowed.
    pub fn heal(&mut self, actor: ActorId, amount: f32) -> Vec<Outbound> {
        self.run(|engine, out| {
            let Some(state) = engine.state.actors.get_mut(&actor) else {
                log_error("heal", &CombatError::InvalidActor { actor });
                return;
            };
            state.health.heal(actor, amount, out);
            out.push(Outbound::DamageNumber {
                actor,
                amount: -amount,
            });
        })
    }

    pub(super) fn report(
        &mut self,
        id: ActorId,
        info: DamageInfo,
        immediate: bool,
        out: &mut Outbox,
    ) {
        let Some(actor) = self.state.actors.get_mut(&id) else {
            log_error("report_damage", &CombatError::InvalidActor { actor: id });
            return;
        };

        // Wire payloads bypass `DamageInfo::new`, so the amount is checked here.
        if info.amount.is_nan() || info.amount < 0.0 {
            debug!(actor = %id, amount = info.amount, "rejected damage report");
            log_error("report_damage", &CombatError::InvalidDamage { actor: id });
            return;
        }

        if actor.is_character() {
            out.push(Outbound::ActorDamaged { actor: id });
            if !immediate {
                actor.health.enqueue(id, info, out);
                return;
            }
        }

        self.apply(id, info, out);
    }

    fn flush(&mut self, id: ActorId, out: &mut Outbox) {
        let Some(actor) = self.state.actors.get_mut(&id) else {
            log_error("flush_queue", &CombatError::InvalidActor { actor: id });
            return;
        };

        let Some(batch) = actor.health.drain(id, out) else {
            info!(actor = %id, "nothing in damage queue");
            return;
        };

        if batch.total >= actor.health.current()
            && actor.is_character()
            && actor.death.is_alive()
            && actor.death_reason.is_none()
        {
            actor.death_reason = Some(DeathReason::resolve(id, &batch.entries));
        }

        out.push(Outbound::DamageNumber {
            actor: id,
            amount: batch.total,
        });
        self.report(id, DamageInfo::sourceless(batch.total), true, out);
    }

    /// Subtracts health and starts the death sequence on the first lethal hit.
    fn apply(&mut self, id: ActorId, info: DamageInfo, out: &mut Outbox) {
        let Some(actor) = self.state.actors.get_mut(&id) else {
            return;
        };

        actor.health.subtract(id, info.amount, out);
        out.push(Outbound::ObjectDamaged {
            actor: id,
            info: info.clone(),
        });

        if !actor.health.is_lethal() || !actor.death.is_alive() {
            return;
        }

        let kill_zone = info.is_kill_zone();
        if actor.is_character() {
            if actor.death_reason.is_none() {
                // Kill zones credit whoever hit the actor last before it fell.
                let mut lookback: ArrayVec<DamageInfo, 2> = ArrayVec::new();
                if kill_zone && let Some(previous) = actor.health.last_pending() {
                    lookback.push(previous.clone());
                }
                lookback.push(info.clone());
                actor.death_reason = Some(DeathReason::resolve(id, &lookback));
            }

            if kill_zone {
                out.push(Outbound::KillZoneIndicator {
                    position: info.world_position,
                });
            }

            info!(actor = %id, name = %actor.name, "actor died, handling death");
            out.push(Outbound::ActorDied { actor: id });
        }

        let removal = if kill_zone {
            RemovalMode::Immediate
        } else {
            RemovalMode::Staged
        };
        self.start_death(id, removal, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageType, DeathStage, tags};
    use crate::config::CombatConfig;
    use crate::engine::fixtures::*;
    use crate::state::{ActorSpec, MatchState, Vec3};

    fn health(state: &MatchState, actor: ActorId) -> f32 {
        state.actor(actor).expect("actor").health.current()
    }

    #[test]
    fn queued_damage_applies_as_one_subtraction() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        for amount in [3.0, 7.5, 12.0, 0.5] {
            let out = engine.report_damage(BOB_GRUB, DamageInfo::new(amount, Some(ALICE_GRUB)), false);
            assert_eq!(out[0], Outbound::ActorDamaged { actor: BOB_GRUB });
        }
        assert_eq!(health(engine.state(), BOB_GRUB), 100.0);

        let out = engine.flush_queue(BOB_GRUB);
        assert_eq!(health(engine.state(), BOB_GRUB), 77.0);

        let subtractions = count(&out, |m| matches!(m, Outbound::ObjectDamaged { .. }));
        assert_eq!(subtractions, 1);
        assert!(out.contains(&Outbound::DamageNumber {
            actor: BOB_GRUB,
            amount: 23.0
        }));
        assert!(!engine.state().actor(BOB_GRUB).unwrap().health.has_been_damaged());
    }

    #[test]
    fn lethal_flush_starts_death_once_and_credits_last_hit() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let third = ActorId(30);
        engine.spawn_actor(ActorSpec::object(third, "turret", 50.0));

        engine.report_damage(BOB_GRUB, DamageInfo::new(60.0, None), true);
        assert_eq!(health(engine.state(), BOB_GRUB), 40.0);

        engine.report_damage(BOB_GRUB, DamageInfo::new(25.0, Some(ALICE_GRUB)), false);
        engine.report_damage(BOB_GRUB, DamageInfo::new(30.0, Some(third)), false);
        let out = engine.flush_queue(BOB_GRUB);

        assert_eq!(health(engine.state(), BOB_GRUB), -15.0);
        assert_eq!(
            scheduled(&out),
            vec![(BOB_GRUB, DeathStage::Grace, config.death_grace_ms)]
        );
        assert_eq!(count(&out, |m| matches!(m, Outbound::ActorDied { .. })), 1);

        let reason = engine
            .state()
            .actor(BOB_GRUB)
            .and_then(|a| a.death_reason.clone())
            .expect("resolved on flush");
        assert_eq!(reason.attacker_id, third);
        assert_eq!(reason.primary_attacker, Some(ALICE_GRUB));

        // Further lethal damage never re-enters the sequence.
        engine.report_damage(BOB_GRUB, DamageInfo::new(10.0, Some(ALICE_GRUB)), false);
        let again = engine.flush_queue(BOB_GRUB);
        assert!(scheduled(&again).is_empty());
        assert_eq!(count(&again, |m| matches!(m, Outbound::ActorDied { .. })), 0);
    }

    #[test]
    fn lethal_batch_credits_the_final_hit() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let sniper = ActorId(31);
        engine.spawn_actor(ActorSpec::object(sniper, "sniper nest", 10.0));

        engine.report_damage(BOB_GRUB, DamageInfo::new(30.0, Some(ALICE_GRUB)), false);
        engine.report_damage(BOB_GRUB, DamageInfo::new(80.0, Some(sniper)), false);
        engine.flush_queue(BOB_GRUB);

        let reason = engine.state().actor(BOB_GRUB).unwrap().death_reason.clone().unwrap();
        assert_eq!(reason.attacker_id, sniper);
        assert_eq!(reason.secondary_cause, DamageType::Direct);
    }

    #[test]
    fn heal_emits_negative_damage_number() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        engine.report_damage(ALICE_GRUB, DamageInfo::new(50.0, None), true);

        let out = engine.heal(ALICE_GRUB, 20.0);
        assert_eq!(health(engine.state(), ALICE_GRUB), 70.0);
        assert!(out.contains(&Outbound::DamageNumber {
            actor: ALICE_GRUB,
            amount: -20.0
        }));

        engine.heal(ALICE_GRUB, 100.0);
        assert_eq!(health(engine.state(), ALICE_GRUB), 170.0);
    }

    #[test]
    fn kill_zone_credits_previous_queued_attacker() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.report_damage(BOB_GRUB, DamageInfo::new(10.0, Some(ALICE_GRUB)), false);
        let water = Vec3::new(5.0, 0.0, -100.0);
        let out = engine.report_damage(
            BOB_GRUB,
            DamageInfo::new(999.0, None).with_tag(tags::KILL_ZONE).at(water),
            true,
        );

        assert!(out.contains(&Outbound::KillZoneIndicator { position: water }));
        assert!(scheduled(&out).is_empty());
        assert!(out.contains(&Outbound::KillCredited {
            victim: BOB_GRUB,
            killer: ALICE_GRUB
        }));
        assert!(!out.iter().any(|m| matches!(
            m,
            Outbound::Effect(crate::outbound::EffectRequest::GraveSpawned { .. })
        )));
        assert!(engine.state().actor(BOB_GRUB).is_none());
    }

    #[test]
    fn negative_reports_are_rejected() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let heal_attempt = DamageInfo {
            amount: -50.0,
            ..DamageInfo::default()
        };

        assert!(engine.report_damage(BOB_GRUB, heal_attempt.clone(), true).is_empty());
        assert_eq!(health(engine.state(), BOB_GRUB), 100.0);

        let not_a_number = DamageInfo {
            amount: f32::NAN,
            ..DamageInfo::default()
        };
        assert!(engine.report_damage(BOB_GRUB, not_a_number, true).is_empty());

        // Queued reports cannot offset real damage in the batch either.
        engine.report_damage(BOB_GRUB, DamageInfo::new(30.0, Some(ALICE_GRUB)), false);
        assert!(engine.report_damage(BOB_GRUB, heal_attempt, false).is_empty());
        let out = engine.flush_queue(BOB_GRUB);
        assert!(out.contains(&Outbound::DamageNumber {
            actor: BOB_GRUB,
            amount: 30.0
        }));
        assert_eq!(health(engine.state(), BOB_GRUB), 70.0);
    }

    #[test]
    fn objects_take_damage_immediately() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let barrel = ActorId(40);
        engine.spawn_actor(ActorSpec::object(barrel, "barrel", 30.0));

        let out = engine.report_damage(barrel, DamageInfo::new(12.0, Some(ALICE_GRUB)), false);
        assert_eq!(health(engine.state(), barrel), 18.0);
        assert_eq!(count(&out, |m| matches!(m, Outbound::ActorDamaged { .. })), 0);
    }

    #[test]
    fn invalid_actor_is_a_silent_noop() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let ghost = ActorId(404);

        assert!(engine.report_damage(ghost, DamageInfo::new(5.0, None), false).is_empty());
        assert!(engine.flush_queue(ghost).is_empty());
        assert!(engine.heal(ghost, 5.0).is_empty());
    }

    #[test]
    fn empty_flush_changes_nothing() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        assert!(engine.flush_queue(ALICE_GRUB).is_empty());
        assert_eq!(health(engine.state(), ALICE_GRUB), 100.0);
    }
}
