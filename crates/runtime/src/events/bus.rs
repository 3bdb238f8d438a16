//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::Event;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Damage, deaths, kill credit and on-death behaviors
    Combat,
    /// Deploy, holster, dismount and browser toggles
    Equipment,
    /// Effects, damage numbers and death-log lines
    Presentation,
    /// Versioned field updates for observer mirrors
    Replication,
}

/// Topic-based event bus
///
/// Cloning shares the underlying channels, so every clone publishes to the
/// same subscribers.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    equipment: broadcast::Sender<Event>,
    presentation: broadcast::Sender<Event>,
    replication: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            combat: broadcast::channel(capacity).0,
            equipment: broadcast::channel(capacity).0,
            presentation: broadcast::channel(capacity).0,
            replication: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Equipment => &self.equipment,
            Topic::Presentation => &self.presentation,
            Topic::Replication => &self.replication,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(%topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ActorId, Outbound};

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut presentation = bus.subscribe(Topic::Presentation);

        bus.publish(Event::Presentation(Outbound::DeathMessage("gone".into())));
        bus.publish(Event::Combat(Outbound::ActorDied { actor: ActorId(4) }));

        assert_eq!(
            combat.recv().await.unwrap(),
            Event::Combat(Outbound::ActorDied { actor: ActorId(4) })
        );
        assert!(combat.try_recv().is_err());
        assert!(matches!(
            presentation.recv().await.unwrap(),
            Event::Presentation(Outbound::DeathMessage(_))
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(Event::Combat(Outbound::ActorDied { actor: ActorId(1) }));
    }
}
