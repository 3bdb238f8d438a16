//! Runtime configuration and environment overrides.
use std::env;

use skirmish_core::{CombatConfig, SessionId};
use tracing::warn;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Session treated as the host by authority checks.
    pub host_session: SessionId,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            host_session: SessionId(0),
        }
    }
}

impl RuntimeConfig {
    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            ..Self::default()
        }
    }

    /// Defaults with overrides from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies overrides from environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_INFINITE_AMMO` - `true`/`false`
    /// - `SKIRMISH_DEATH_GRACE_MS` - delay before the death marker appears
    /// - `SKIRMISH_DETONATION_DELAY_MS` - delay between marker and explosion
    /// - `SKIRMISH_EVENT_BUFFER` - per-topic broadcast capacity (min 1)
    /// - `SKIRMISH_COMMAND_BUFFER` - command channel capacity (min 1)
    /// - `SKIRMISH_HOST_SESSION` - host session id
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Same as [`Self::with_env`] with a custom variable source.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = parse(&lookup, "SKIRMISH_INFINITE_AMMO") {
            self.combat.infinite_ammo = value;
        }
        if let Some(value) = parse(&lookup, "SKIRMISH_DEATH_GRACE_MS") {
            self.combat.death_grace_ms = value;
        }
        if let Some(value) = parse(&lookup, "SKIRMISH_DETONATION_DELAY_MS") {
            self.combat.detonation_delay_ms = value;
        }
        if let Some(value) = parse::<usize>(&lookup, "SKIRMISH_EVENT_BUFFER") {
            self.event_buffer_size = value.max(1);
        }
        if let Some(value) = parse::<usize>(&lookup, "SKIRMISH_COMMAND_BUFFER") {
            self.command_buffer_size = value.max(1);
        }
        if let Some(value) = parse(&lookup, "SKIRMISH_HOST_SESSION") {
            self.host_session = SessionId(value);
        }

        self
    }
}

fn parse<T>(read: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = read(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_runtime_constants() {
        let config = RuntimeConfig::default();
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.combat.death_grace_ms, 500);
    }

    #[test]
    fn overrides_apply_and_bad_values_are_skipped() {
        let config = RuntimeConfig::default().with_overrides(lookup(&[
            ("SKIRMISH_INFINITE_AMMO", "true"),
            ("SKIRMISH_DEATH_GRACE_MS", "250"),
            ("SKIRMISH_DETONATION_DELAY_MS", "soon"),
            ("SKIRMISH_COMMAND_BUFFER", "0"),
            ("SKIRMISH_HOST_SESSION", "9"),
        ]));

        assert!(config.combat.infinite_ammo);
        assert_eq!(config.combat.death_grace_ms, 250);
        assert_eq!(config.combat.detonation_delay_ms, 750);
        assert_eq!(config.command_buffer_size, 1);
        assert_eq!(config.host_session, SessionId(9));
    }
}
