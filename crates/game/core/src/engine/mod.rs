//! Combat and equipment orchestration.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`MatchState`]. Every
//! operation applies its state change synchronously and returns the ordered
//! [`Outbound`] messages describing what happened. Timed work (the two death
//! stages) is requested via [`Outbound::ScheduleDeathStage`] and delivered
//! back through [`CombatEngine::death_stage`].
//!
//! None of the operations fail: invalid or stale requests are logged at the
//! level their error severity asks for and otherwise ignored.

mod damage;
mod death;
mod equipment;
mod session;

use crate::config::CombatConfig;
use crate::outbound::{Outbound, Outbox};
use crate::state::MatchState;

/// Engine borrowing one match's state and the combat tuning.
pub struct CombatEngine<'a> {
    state: &'a mut MatchState,
    config: &'a CombatConfig,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut MatchState, config: &'a CombatConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    pub fn config(&self) -> &CombatConfig {
        self.config
    }

    fn run(&mut self, op: impl FnOnce(&mut Self, &mut Outbox)) -> Vec<Outbound> {
        let mut out = Outbox::new();
        op(self, &mut out);
        out.into_vec()
    }
}
