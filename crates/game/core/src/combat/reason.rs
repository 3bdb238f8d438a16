//! Death attribution.
//!
//! [`DeathReason::resolve`] inspects the damage batch that killed an actor and
//! picks the two causally relevant entries:
//!
//! - the **secondary** entry is the lethal hit (the last event of the batch)
//! - the **primary** entry is the most recent earlier event not inflicted by
//!   the victim itself
//!
//! Credit normally goes to the lethal hit's source. Kill-trigger deaths credit
//! the primary attacker instead, or the victim when nobody else contributed.

use std::fmt;

use super::damage::{DamageInfo, DamageType, tags};
use crate::state::ActorId;

/// Resolved cause of death. Computed once per death and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathReason {
    pub victim: ActorId,
    pub primary_cause: DamageType,
    pub secondary_cause: DamageType,
    pub primary_attacker: Option<ActorId>,
    pub secondary_attacker: Option<ActorId>,
    /// Credited killer (may be the victim itself).
    pub attacker_id: ActorId,
    pub from_disconnect: bool,
    pub from_environment_trigger: bool,
}

impl DeathReason {
    /// Resolves the death reason for `victim` from its lethal batch, in report order.
    pub fn resolve(victim: ActorId, batch: &[DamageInfo]) -> Self {
        let Some((lethal, earlier)) = batch.split_last() else {
            return Self::unattributed(victim);
        };

        let primary = earlier
            .iter()
            .rev()
            .find(|info| info.source != Some(victim));

        let primary_cause = primary.map_or(DamageType::None, DamageType::classify);
        let primary_attacker = primary.and_then(|info| info.source);
        let secondary_cause = DamageType::classify(lethal);
        let from_environment_trigger = secondary_cause == DamageType::KillTrigger;

        let attacker_id = if from_environment_trigger {
            if primary_cause != DamageType::None {
                primary_attacker.unwrap_or(victim)
            } else {
                victim
            }
        } else {
            lethal.source.unwrap_or(victim)
        };

        Self {
            victim,
            primary_cause,
            secondary_cause,
            primary_attacker,
            secondary_attacker: lethal.source,
            attacker_id,
            from_disconnect: batch.iter().any(|info| info.has_tag(tags::DISCONNECT)),
            from_environment_trigger,
        }
    }

    /// Reason used when an actor dies without any recorded damage.
    pub fn unattributed(victim: ActorId) -> Self {
        Self {
            victim,
            primary_cause: DamageType::None,
            secondary_cause: DamageType::None,
            primary_attacker: None,
            secondary_attacker: None,
            attacker_id: victim,
            from_disconnect: false,
            from_environment_trigger: false,
        }
    }

    pub fn is_self_inflicted(&self) -> bool {
        self.attacker_id == self.victim
    }

    /// Renders the death-log sentence, naming actors through `name`.
    pub fn describe(&self, name: impl Fn(ActorId) -> String) -> String {
        let victim = name(self.victim);
        let attacker = name(self.attacker_id);
        let by_self = self.is_self_inflicted();

        match self.secondary_cause {
            DamageType::Disconnect => {
                format!("{victim} was removed after their player disconnected.")
            }
            DamageType::KillTrigger if by_self => format!("{victim} fell out of the world."),
            DamageType::KillTrigger => {
                format!("{victim} was knocked out of the world by {attacker}.")
            }
            DamageType::Explosion if by_self => format!("{victim} blew themselves up."),
            DamageType::Explosion => format!("{victim} was blown up by {attacker}."),
            DamageType::Fall => format!("{victim} fell to their death."),
            DamageType::Direct if by_self => format!("{victim} took their own life."),
            DamageType::Direct => format!("{victim} was killed by {attacker}."),
            DamageType::None => format!("{victim} died."),
        }
    }
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(|id| id.to_string()))
    }
}
