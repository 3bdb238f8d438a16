//! Loadout loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::ItemTemplate;

use crate::loaders::{LoadResult, read_file};

/// Equipment every player is handed at match start, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub items: Vec<ItemTemplate>,
}

/// Loader for loadouts from RON files.
pub struct LoadoutLoader;

impl LoadoutLoader {
    pub fn load(path: &Path) -> LoadResult<Loadout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Loadout> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse loadout RON: {}", e))
    }
}
