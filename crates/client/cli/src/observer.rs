//! Event logging and an observer-side replica mirror.
use anyhow::Result;
use skirmish_core::Outbound;
use skirmish_runtime::{Event, ReplicaMirror, Runtime, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const LOGGED_TOPICS: [Topic; 3] = [Topic::Combat, Topic::Equipment, Topic::Presentation];

/// Background listeners attached to a running match.
pub struct Observer {
    loggers: Vec<JoinHandle<()>>,
    mirror: JoinHandle<ReplicaMirror>,
}

impl Observer {
    /// Subscribes to every topic. Listeners end when the runtime shuts down.
    pub fn attach(runtime: &Runtime, json: bool) -> Self {
        let loggers = LOGGED_TOPICS
            .iter()
            .map(|&topic| tokio::spawn(log_topic(topic, runtime.subscribe(topic), json)))
            .collect();
        let mirror = tokio::spawn(mirror_replicas(runtime.subscribe(Topic::Replication)));

        Self { loggers, mirror }
    }

    /// Waits for every listener and returns the synced mirror.
    pub async fn finish(self) -> Result<ReplicaMirror> {
        for logger in self.loggers {
            logger.await?;
        }
        Ok(self.mirror.await?)
    }
}

async fn log_topic(topic: Topic, mut rx: broadcast::Receiver<Event>, json: bool) {
    loop {
        match rx.recv().await {
            Ok(event) if json => match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(error) => warn!(%topic, %error, "failed to encode event"),
            },
            Ok(Event::Presentation(Outbound::DeathMessage(line))) => info!("{line}"),
            Ok(event) => info!(%topic, ?event),
            Err(RecvError::Lagged(missed)) => warn!(%topic, missed, "event listener lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

async fn mirror_replicas(mut rx: broadcast::Receiver<Event>) -> ReplicaMirror {
    let mut mirror = ReplicaMirror::new();
    loop {
        match rx.recv().await {
            Ok(event) => {
                if !mirror.observe(&event) {
                    debug!(?event, "replica update ignored");
                }
            }
            Err(RecvError::Lagged(missed)) => warn!(missed, "replica mirror lagged"),
            Err(RecvError::Closed) => break mirror,
        }
    }
}
