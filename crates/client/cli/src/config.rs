//! CLI-specific configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the scripted skirmish.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `combat.toml` and `loadout.ron`.
    pub data_dir: PathBuf,
    /// Pause between scripted requests.
    pub pace: Duration,
    /// Print every event as a JSON line on stdout.
    pub json_events: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../game/content/data"),
            pace: Duration::from_millis(50),
            json_events: false,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - content directory (default: bundled data)
    /// - `SKIRMISH_PACE_MS` - pause between scripted requests (default: 50)
    /// - `SKIRMISH_JSON_EVENTS` - emit events as JSON lines (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("SKIRMISH_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(ms) = read_env::<u64>("SKIRMISH_PACE_MS") {
            config.pace = Duration::from_millis(ms);
        }
        if let Some(json) = read_env::<bool>("SKIRMISH_JSON_EVENTS") {
            config.json_events = json;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
