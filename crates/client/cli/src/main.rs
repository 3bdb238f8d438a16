//! Headless skirmish: loads content, hosts a match and plays a scripted
//! round while logging every event.
mod config;
mod observer;
mod script;

use std::time::Duration;

use anyhow::{Context, Result};
use skirmish_content::ContentFactory;
use skirmish_runtime::{Runtime, RuntimeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use observer::Observer;
use script::PacedScript;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    setup_logging();

    let config = CliConfig::from_env();
    let content = ContentFactory::new(config.data_dir.clone());
    let combat = content
        .load_config()
        .with_context(|| format!("loading combat config from {}", content.data_dir().display()))?;
    let loadout = content
        .load_loadout()
        .with_context(|| format!("loading loadout from {}", content.data_dir().display()))?;

    let runtime_config = RuntimeConfig::new(combat).with_env();
    let settle = Duration::from_millis(
        runtime_config.combat.death_grace_ms + runtime_config.combat.detonation_delay_ms + 100,
    );
    info!(items = loadout.items.len(), ?settle, "starting skirmish");

    let runtime = Runtime::start(runtime_config);
    let observer = Observer::attach(&runtime, config.json_events);

    let mut script = PacedScript::new(script::skirmish(&loadout, settle), config.pace);
    let accepted = runtime.drive(&mut script).await?;

    let state = runtime.handle().query_state().await?;
    for player in state.players.values() {
        info!(
            player = %player.id,
            name = %player.name,
            connected = player.connected,
            survivors = player.actors.len(),
            items = player.inventory.len(),
            "final standing"
        );
    }

    runtime.shutdown().await?;
    let mirror = observer.finish().await?;
    info!(accepted, mirrored_fields = mirror.len(), "skirmish finished");

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` on top of an `info` default.
fn setup_logging() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
