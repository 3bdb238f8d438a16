//! The scripted skirmish played by the binary.
//!
//! Two players take one turn each: Alice shells Bob's grub and a barrel,
//! Bob loses a second grub to the water, and Alice finally drops her
//! connection.
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use skirmish_content::Loadout;
use skirmish_core::{
    ActorId, ActorSpec, DamageInfo, Facing, InputFrame, MatchState, OnDeath, PlayerId, SessionId,
    UsePhase, Vec3, tags,
};
use skirmish_runtime::{Envelope, EnvelopeProvider, Inbound};
use tracing::debug;

const ALICE_SESSION: SessionId = SessionId(1);
const BOB_SESSION: SessionId = SessionId(2);
const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

const ALICE_GRUB: ActorId = ActorId(10);
const BOB_GRUB: ActorId = ActorId(20);
const BOB_SECOND: ActorId = ActorId(21);
const BARREL: ActorId = ActorId(50);

pub enum Step {
    Send(Envelope),
    /// Report use of whatever `player` has in its active slot.
    UseActive {
        session: SessionId,
        player: PlayerId,
        phase: UsePhase,
    },
    /// Let pending death sequences play out.
    Wait(Duration),
}

/// Feeds steps to the runtime with a fixed pause between requests.
pub struct PacedScript {
    steps: VecDeque<Step>,
    pace: Duration,
}

impl PacedScript {
    pub fn new(steps: Vec<Step>, pace: Duration) -> Self {
        Self {
            steps: steps.into(),
            pace,
        }
    }
}

#[async_trait]
impl EnvelopeProvider for PacedScript {
    async fn next_envelope(&mut self, state: &MatchState) -> Option<Envelope> {
        loop {
            match self.steps.pop_front()? {
                Step::Send(envelope) => {
                    tokio::time::sleep(self.pace).await;
                    return Some(envelope);
                }
                Step::UseActive {
                    session,
                    player,
                    phase,
                } => {
                    let Some(slot) = state.player(player).map(|p| p.inventory.active_slot()) else {
                        debug!(%player, "skipping item use for missing player");
                        continue;
                    };
                    tokio::time::sleep(self.pace).await;
                    return Some(Envelope::from_session(
                        session,
                        Inbound::RecordItemUse {
                            player,
                            slot,
                            phase,
                        },
                    ));
                }
                Step::Wait(duration) => {
                    debug!(?duration, "waiting for death sequences");
                    tokio::time::sleep(duration).await;
                }
            }
        }
    }
}

fn host(command: Inbound) -> Step {
    Step::Send(Envelope::host(command))
}

fn from(session: SessionId, command: Inbound) -> Step {
    Step::Send(Envelope::from_session(session, command))
}

fn damage(actor: ActorId, info: DamageInfo, immediate: bool) -> Inbound {
    Inbound::ReportDamage {
        actor,
        info,
        immediate,
    }
}

/// Builds the full skirmish. `settle` should cover the grace and detonation
/// delays.
pub fn skirmish(loadout: &Loadout, settle: Duration) -> Vec<Step> {
    let barrel = ActorSpec::object(BARREL, "oil barrel", 25.0)
        .at(Vec3::new(250.0, 0.0, 10.0))
        .with_on_death(OnDeath {
            explode: true,
            ..OnDeath::default()
        });

    vec![
        // Lobby
        host(Inbound::RegisterPlayer {
            player: ALICE,
            name: "alice".into(),
            session: ALICE_SESSION,
        }),
        host(Inbound::RegisterPlayer {
            player: BOB,
            name: "bob".into(),
            session: BOB_SESSION,
        }),
        host(Inbound::SpawnActor(
            ActorSpec::character(ALICE_GRUB, "Sir Wiggles", ALICE, 100.0)
                .at(Vec3::new(100.0, 0.0, 10.0)),
        )),
        host(Inbound::SpawnActor(
            ActorSpec::character(BOB_GRUB, "Grubby", BOB, 100.0)
                .at(Vec3::new(300.0, 0.0, 10.0))
                .facing(Facing::Left),
        )),
        host(Inbound::SpawnActor(
            ActorSpec::character(BOB_SECOND, "Nibbles", BOB, 100.0).at(Vec3::new(420.0, 0.0, 10.0)),
        )),
        host(Inbound::SpawnActor(barrel)),
        from(
            ALICE_SESSION,
            Inbound::InitializeInventory {
                player: ALICE,
                templates: loadout.items.clone(),
            },
        ),
        from(
            BOB_SESSION,
            Inbound::InitializeInventory {
                player: BOB,
                templates: loadout.items.clone(),
            },
        ),
        // Alice's turn
        host(Inbound::BeginTurn { player: ALICE }),
        from(
            ALICE_SESSION,
            Inbound::PollInput {
                player: ALICE,
                frame: InputFrame::toggle(),
            },
        ),
        from(
            ALICE_SESSION,
            Inbound::PollInput {
                player: ALICE,
                frame: InputFrame::next(),
            },
        ),
        from(
            ALICE_SESSION,
            Inbound::PollInput {
                player: ALICE,
                frame: InputFrame::toggle(),
            },
        ),
        Step::UseActive {
            session: ALICE_SESSION,
            player: ALICE,
            phase: UsePhase::Started,
        },
        Step::UseActive {
            session: ALICE_SESSION,
            player: ALICE,
            phase: UsePhase::Finished,
        },
        // Swapping after firing is refused; the rejection is only logged.
        from(
            ALICE_SESSION,
            Inbound::CycleSlot {
                player: ALICE,
                forward: true,
            },
        ),
        from(
            BOB_SESSION,
            damage(BOB_GRUB, DamageInfo::new(45.0, Some(ALICE_GRUB)), false),
        ),
        from(
            BOB_SESSION,
            damage(
                BOB_GRUB,
                DamageInfo::new(60.0, Some(ALICE_GRUB)).with_tag(tags::EXPLOSION),
                false,
            ),
        ),
        host(damage(
            BARREL,
            DamageInfo::new(30.0, Some(ALICE_GRUB)).with_tag(tags::EXPLOSION),
            false,
        )),
        from(BOB_SESSION, Inbound::FlushQueue { actor: BOB_GRUB }),
        host(Inbound::HolsterActive { player: ALICE }),
        Step::Wait(settle),
        // Bob's turn
        host(Inbound::BeginTurn { player: BOB }),
        // Alice cannot steal the turn.
        from(ALICE_SESSION, Inbound::BeginTurn { player: ALICE }),
        from(
            BOB_SESSION,
            Inbound::CycleSlot {
                player: BOB,
                forward: false,
            },
        ),
        from(
            BOB_SESSION,
            damage(
                BOB_SECOND,
                DamageInfo::sourceless(500.0)
                    .with_tag(tags::KILL_ZONE)
                    .at(Vec3::new(420.0, 0.0, -200.0)),
                true,
            ),
        ),
        from(BOB_SESSION, Inbound::HolsterActive { player: BOB }),
        // Alice rage-quits.
        host(Inbound::Disconnect {
            session: ALICE_SESSION,
        }),
        Step::Wait(settle),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelopes(steps: &[Step]) -> impl Iterator<Item = &Envelope> {
        steps.iter().filter_map(|step| match step {
            Step::Send(envelope) => Some(envelope),
            _ => None,
        })
    }

    #[test]
    fn match_shaping_requests_come_from_the_host() {
        let steps = skirmish(&Loadout::default(), Duration::ZERO);
        let spawns = envelopes(&steps)
            .filter(|e| matches!(e.command, Inbound::SpawnActor(_) | Inbound::RegisterPlayer { .. }))
            .collect::<Vec<_>>();
        assert_eq!(spawns.len(), 6);
        assert!(spawns.iter().all(|e| e.caller == skirmish_runtime::Caller::Host));
    }

    #[tokio::test(start_paused = true)]
    async fn item_use_targets_the_active_slot() {
        let mut script = PacedScript::new(
            vec![
                Step::Wait(Duration::from_secs(1)),
                Step::UseActive {
                    session: ALICE_SESSION,
                    player: ALICE,
                    phase: UsePhase::Started,
                },
            ],
            Duration::ZERO,
        );

        // Without Alice in the state the use step is skipped entirely.
        assert!(script.next_envelope(&MatchState::new()).await.is_none());
    }
}
