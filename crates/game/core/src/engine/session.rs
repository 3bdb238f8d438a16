//! Match setup and session lifecycle: actors, players, turns, disconnects.

use tracing::{debug, info};

use super::CombatEngine;
use crate::combat::{CombatError, DamageInfo, tags};
use crate::error::log_error;
use crate::outbound::Outbound;
use crate::state::{ActorId, ActorKind, ActorSpec, ActorState, PlayerId, PlayerState, SessionId};

impl CombatEngine<'_> {
    /// Adds an actor. Characters join their owner's roster and become active
    /// if the owner controls nothing yet.
    pub fn spawn_actor(&mut self, spec: ActorSpec) -> Vec<Outbound> {
        self.run(|engine, _| {
            let id = spec.id;
            if engine.state.actors.contains_key(&id) {
                log_error("spawn_actor", &CombatError::DuplicateActor { actor: id });
                return;
            }

            if let ActorKind::Character { owner } = spec.kind {
                let Some(player) = engine.state.players.get_mut(&owner) else {
                    log_error("spawn_actor", &CombatError::UnknownPlayer { player: owner });
                    return;
                };
                player.actors.push(id);
                player.active_actor.get_or_insert(id);
            }

            debug!(actor = %id, name = %spec.name, "spawned actor");
            engine.state.actors.insert(id, ActorState::from_spec(spec));
        })
    }

    /// Removes an actor through a path other than death. Pending death stages
    /// for it are dropped when they fire.
    pub fn despawn(&mut self, actor: ActorId) -> Vec<Outbound> {
        self.run(|engine, out| {
            let Some(owner) = engine.state.actor(actor).map(ActorState::owner) else {
                log_error("despawn", &CombatError::InvalidActor { actor });
                return;
            };
            // The item rides on the controlled character; put it away first.
            if let Some(owner) = owner
                && engine
                    .state
                    .player(owner)
                    .is_some_and(|player| player.active_actor == Some(actor))
            {
                engine.holster_for(owner, out);
            }

            engine.state.actors.remove(&actor);
            if let Some(owner) = owner
                && let Some(player) = engine.state.players.get_mut(&owner)
            {
                player.release_actor(actor);
            }
            out.push(Outbound::ActorDestroyed { actor });
        })
    }

    /// Records what `actor` is riding, if anything.
    pub fn mount(&mut self, actor: ActorId, mount: Option<ActorId>) -> Vec<Outbound> {
        self.run(|engine, _| match engine.state.actors.get_mut(&actor) {
            Some(state) => state.mounted_on = mount,
            None => log_error("mount", &CombatError::InvalidActor { actor }),
        })
    }

    pub fn register_player(
        &mut self,
        player: PlayerId,
        name: impl Into<String>,
        session: SessionId,
    ) -> Vec<Outbound> {
        self.run(|engine, _| {
            let name = name.into();
            info!(%player, %session, %name, "player registered");
            if let Some(previous) = engine.state.sessions.insert(session, player)
                && previous != player
            {
                debug!(%session, %previous, "session rebound to a new player");
            }
            engine
                .state
                .players
                .insert(player, PlayerState::new(player, name, session));
        })
    }

    /// Handles a dropped session: its characters die with disconnect
    /// attribution, its items are destroyed and the session is forgotten.
    pub fn disconnect(&mut self, session: SessionId) -> Vec<Outbound> {
        self.run(|engine, out| {
            let Some(player) = engine.state.sessions.player(session) else {
                log_error("disconnect", &CombatError::UnknownSession { session });
                return;
            };
            info!(%player, %session, "player disconnected");

            let owned = engine
                .state
                .player(player)
                .map(|state| state.actors.clone())
                .unwrap_or_default();

            for actor in owned {
                let Some(health) = engine
                    .state
                    .actor(actor)
                    .filter(|state| state.death.is_alive())
                    .map(|state| state.health.current())
                else {
                    continue;
                };
                let info = DamageInfo::new(health, None).with_tag(tags::DISCONNECT);
                engine.report(actor, info, true, out);
            }

            if let Some(state) = engine.state.players.get_mut(&player) {
                let destroyed = state.inventory.cleanup(out);
                debug!(%player, items = destroyed.len(), "inventory cleaned up");
                state.connected = false;
            }
            engine.state.sessions.remove(session);
        })
    }

    /// Starts `player`'s turn: clears the acted flag and item usage.
    pub fn begin_turn(&mut self, player: PlayerId) -> Vec<Outbound> {
        self.run(|engine, _| {
            let Some(state) = engine.state.players.get_mut(&player) else {
                log_error("begin_turn", &CombatError::UnknownPlayer { player });
                return;
            };
            state.has_acted_this_turn = false;
            state.inventory.reset_usage();
            engine.state.turn.active_player = Some(player);
            debug!(%player, "turn started");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DeathStage, DamageType};
    use crate::config::CombatConfig;
    use crate::engine::fixtures::*;
    use crate::equipment::{EquipmentCategory, ItemTemplate};
    use crate::outbound::{EffectRequest, EquipmentEvent};

    #[test]
    fn characters_join_their_owner() {
        let config = CombatConfig::default();
        let state = two_player_match(&config);

        let alice = state.player(ALICE).unwrap();
        assert_eq!(alice.actors, vec![ALICE_GRUB]);
        assert_eq!(alice.active_actor, Some(ALICE_GRUB));
        assert_eq!(state.sessions.player(SessionId(2)), Some(BOB));
        assert_eq!(state.turn.active_player, Some(ALICE));
    }

    #[test]
    fn spawn_rejects_duplicates_and_orphans() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.spawn_actor(ActorSpec::object(ALICE_GRUB, "impostor", 1.0));
        assert_eq!(engine.state().actor(ALICE_GRUB).unwrap().name, "Alice's grub");

        engine.spawn_actor(ActorSpec::character(ActorId(99), "orphan", PlayerId(42), 50.0));
        assert!(engine.state().actor(ActorId(99)).is_none());
    }

    #[test]
    fn despawn_hands_control_to_next_character() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        let second = ActorId(11);
        engine.spawn_actor(ActorSpec::character(second, "Alice's second", ALICE, 100.0));

        let out = engine.despawn(ALICE_GRUB);
        assert_eq!(out, vec![Outbound::ActorDestroyed { actor: ALICE_GRUB }]);
        assert_eq!(engine.state().player(ALICE).unwrap().active_actor, Some(second));
    }

    #[test]
    fn despawn_holsters_the_carried_item() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        engine.initialize_inventory(ALICE, &[ItemTemplate::new("uzi", EquipmentCategory::Weapon)]);
        engine.equip(ALICE, 0);
        assert!(engine.state().player(ALICE).unwrap().inventory.equipment_active());

        let out = engine.despawn(ALICE_GRUB);
        assert!(out.iter().any(|m| matches!(
            m,
            Outbound::Equipment(EquipmentEvent::Holstered { player, slot: 0, .. }) if *player == ALICE
        )));
        assert_eq!(out.last(), Some(&Outbound::ActorDestroyed { actor: ALICE_GRUB }));

        let inventory = &engine.state().player(ALICE).unwrap().inventory;
        assert!(!inventory.equipment_active());
        assert!(inventory.items().iter().all(|item| item.carrier.is_none()));
    }

    #[test]
    fn disconnect_kills_with_small_blast_and_cleans_up() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        engine.initialize_inventory(BOB, &[ItemTemplate::new("uzi", EquipmentCategory::Weapon)]);

        let out = engine.disconnect(SessionId(2));
        assert_eq!(scheduled(&out), vec![(BOB_GRUB, DeathStage::Grace, 500)]);

        let bob = engine.state().player(BOB).unwrap();
        assert!(bob.inventory.is_empty());
        assert!(!bob.connected);
        assert_eq!(engine.state().sessions.player(SessionId(2)), None);

        let reason = engine.state().actor(BOB_GRUB).unwrap().death_reason.clone().unwrap();
        assert!(reason.from_disconnect);
        assert_eq!(reason.secondary_cause, DamageType::Disconnect);

        engine.death_stage(BOB_GRUB, DeathStage::Grace);
        let detonate = engine.death_stage(BOB_GRUB, DeathStage::Detonate);
        assert!(detonate.iter().any(|m| matches!(
            m,
            Outbound::Effect(EffectRequest::Explosion { radius, force, .. })
                if *radius == 40.0 && *force == 15.0
        )));
        assert!(engine.state().actor(BOB_GRUB).is_none());
    }

    #[test]
    fn unknown_session_disconnect_is_ignored() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        let mut engine = CombatEngine::new(&mut state, &config);
        assert!(engine.disconnect(SessionId(77)).is_empty());
    }

    #[test]
    fn begin_turn_switches_active_player() {
        let config = CombatConfig::default();
        let mut state = two_player_match(&config);
        state.players.get_mut(&BOB).unwrap().has_acted_this_turn = true;
        let mut engine = CombatEngine::new(&mut state, &config);

        engine.begin_turn(BOB);
        assert_eq!(engine.state().turn.active_player, Some(BOB));
        assert!(!engine.state().player(BOB).unwrap().has_acted_this_turn);

        engine.begin_turn(PlayerId(9));
        assert_eq!(engine.state().turn.active_player, Some(BOB));
    }
}
