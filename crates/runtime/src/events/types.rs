//! Events published on the bus and how engine output maps onto them.

use serde::{Deserialize, Serialize};
use skirmish_core::{EquipmentEvent, Outbound, ReplicaUpdate};

use super::bus::Topic;

/// Event wrapper carrying the topic-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Health, death and kill notifications for listeners and the turn
    /// orchestrator.
    Combat(Outbound),
    /// Effects, damage numbers and log lines for every client.
    Presentation(Outbound),
    Equipment(EquipmentEvent),
    Replication(ReplicaUpdate),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Presentation(_) => Topic::Presentation,
            Event::Equipment(_) => Topic::Equipment,
            Event::Replication(_) => Topic::Replication,
        }
    }

    /// Wraps an engine message for publication.
    ///
    /// Timer requests are consumed by the match worker and yield `None`.
    pub fn route(message: Outbound) -> Option<Self> {
        let event = match message {
            Outbound::ScheduleDeathStage { .. } => return None,
            Outbound::Equipment(event) => Event::Equipment(event),
            Outbound::Replicated(update) => Event::Replication(update),
            Outbound::DamageNumber { .. }
            | Outbound::DeathMessage(_)
            | Outbound::KillZoneIndicator { .. }
            | Outbound::Effect(_) => Event::Presentation(message),
            Outbound::ActorDamaged { .. }
            | Outbound::ActorDied { .. }
            | Outbound::ObjectDamaged { .. }
            | Outbound::ObjectDied { .. }
            | Outbound::KillCredited { .. }
            | Outbound::ActorDestroyed { .. }
            | Outbound::ExplodeOnDeath { .. }
            | Outbound::ProximityDetonationStarted { .. } => Event::Combat(message),
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ActorId, DeathStage, EffectRequest, Vec3};

    #[test]
    fn timers_are_not_published() {
        let timer = Outbound::ScheduleDeathStage {
            actor: ActorId(1),
            stage: DeathStage::Grace,
            delay_ms: 500,
        };
        assert_eq!(Event::route(timer), None);
    }

    #[test]
    fn effects_go_to_presentation() {
        let effect = Outbound::Effect(EffectRequest::GraveSpawned {
            position: Vec3::ZERO,
        });
        assert_eq!(Event::route(effect).map(|e| e.topic()), Some(Topic::Presentation));

        let died = Outbound::ActorDied { actor: ActorId(2) };
        assert_eq!(Event::route(died).map(|e| e.topic()), Some(Topic::Combat));
    }
}
