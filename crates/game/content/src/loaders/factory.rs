//! Content factory for loading match content from a data directory.

use std::path::{Path, PathBuf};

use skirmish_core::CombatConfig;

use crate::loaders::{ConfigLoader, LoadResult, Loadout, LoadoutLoader};

/// Content factory that loads all match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// └── loadout.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat tuning from `combat.toml`, falling back to defaults when absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the starting loadout from `loadout.ron`.
    pub fn load_loadout(&self) -> LoadResult<Loadout> {
        let path = self.data_dir.join("loadout.ron");
        LoadoutLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("combat.toml"), "detonation_delay_ms = 10\n").unwrap();
        fs::write(
            dir.path().join("loadout.ron"),
            r#"(items: [(name: "uzi", drop_chance: 1.0)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().detonation_delay_ms, 10);
        assert_eq!(factory.load_loadout().unwrap().items[0].name, "uzi");
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_loadout().is_err());
    }
}
