//! Authority checks for incoming requests.
//!
//! The host runs the only [`skirmish_core::CombatEngine`]. Sessions may ask it
//! to act, but only on what they own; host-only requests shape the match
//! itself.
use skirmish_core::{ActorKind, MatchState, SessionId};
use tracing::debug;

use crate::api::{Authority, Caller, Envelope, Result, RuntimeError, Subject};

/// Validates envelopes against the current match state.
#[derive(Debug, Clone, Copy)]
pub struct AuthorityRouter {
    host_session: SessionId,
}

impl AuthorityRouter {
    pub fn new(host_session: SessionId) -> Self {
        Self { host_session }
    }

    pub fn host_session(&self) -> SessionId {
        self.host_session
    }

    pub fn is_host(&self, caller: Caller) -> bool {
        match caller {
            Caller::Host => true,
            Caller::Session(session) => session == self.host_session,
        }
    }

    /// Accepts or rejects `envelope` for `state`.
    pub fn authorize(&self, envelope: &Envelope, state: &MatchState) -> Result<()> {
        let caller = envelope.caller;
        let allowed = match envelope.command.authority() {
            Authority::Host => self.is_host(caller),
            Authority::Owner(subject) => match Self::owning_session(subject, state) {
                Some(owner) => caller == Caller::Session(owner),
                None => self.is_host(caller),
            },
            Authority::Broadcast => match caller {
                Caller::Host => true,
                Caller::Session(session) => {
                    session == self.host_session || state.sessions.contains(session)
                }
            },
        };

        if allowed {
            Ok(())
        } else {
            let command = envelope.command.label();
            debug!(%caller, command, "request rejected by authority check");
            Err(RuntimeError::Unauthorized { caller, command })
        }
    }

    /// Session that owns `subject`, if it is a character or a player.
    fn owning_session(subject: Subject, state: &MatchState) -> Option<SessionId> {
        let player = match subject {
            Subject::Player(player) => player,
            Subject::Actor(actor) => match state.actor(actor)?.kind {
                ActorKind::Character { owner } => owner,
                ActorKind::Object => return None,
            },
        };
        state.player(player).map(|player| player.session)
    }
}
