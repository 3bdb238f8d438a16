/// Radius and force of an explosion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlastProfile {
    pub radius: f32,
    pub force: f32,
}

impl BlastProfile {
    pub const fn new(radius: f32, force: f32) -> Self {
        Self { radius, force }
    }
}

/// Combat tuning constants and runtime-tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Delay before the death marker appears, so observers can render zero health.
    pub death_grace_ms: u64,
    /// Delay between the marker appearing and the death explosion.
    pub detonation_delay_ms: u64,
    /// Horizontal marker shift for left-facing actors.
    pub marker_facing_offset: f32,
    pub standard_blast: BlastProfile,
    pub disconnect_blast: BlastProfile,
    pub grave_plane_y: f32,
    pub grave_lift_z: f32,
    pub death_particle_scale: f32,
    pub death_sound: String,
    /// Overrides every item's ammo to unlimited on inventory setup.
    pub infinite_ammo: bool,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DEATH_GRACE_MS: u64 = 500;
    pub const DEFAULT_DETONATION_DELAY_MS: u64 = 750;
    pub const DEFAULT_MARKER_FACING_OFFSET: f32 = 30.0;
    pub const DEFAULT_STANDARD_BLAST: BlastProfile = BlastProfile::new(75.0, 25.0);
    pub const DEFAULT_DISCONNECT_BLAST: BlastProfile = BlastProfile::new(40.0, 15.0);
    pub const DEFAULT_GRAVE_PLANE_Y: f32 = 536.0;
    pub const DEFAULT_GRAVE_LIFT_Z: f32 = 24.0;
    pub const DEFAULT_DEATH_PARTICLE_SCALE: f32 = 100.0;
    pub const DEFAULT_DEATH_SOUND: &'static str = "explosion_short_tail";

    /// Ammo value meaning "unlimited".
    pub const UNLIMITED_AMMO: i32 = -1;

    pub fn new() -> Self {
        Self {
            death_grace_ms: Self::DEFAULT_DEATH_GRACE_MS,
            detonation_delay_ms: Self::DEFAULT_DETONATION_DELAY_MS,
            marker_facing_offset: Self::DEFAULT_MARKER_FACING_OFFSET,
            standard_blast: Self::DEFAULT_STANDARD_BLAST,
            disconnect_blast: Self::DEFAULT_DISCONNECT_BLAST,
            grave_plane_y: Self::DEFAULT_GRAVE_PLANE_Y,
            grave_lift_z: Self::DEFAULT_GRAVE_LIFT_Z,
            death_particle_scale: Self::DEFAULT_DEATH_PARTICLE_SCALE,
            death_sound: Self::DEFAULT_DEATH_SOUND.to_owned(),
            infinite_ammo: false,
        }
    }

    #[must_use]
    pub fn with_infinite_ammo(mut self, infinite_ammo: bool) -> Self {
        self.infinite_ammo = infinite_ammo;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CombatConfig =
            serde_json::from_str(r#"{ "death_grace_ms": 100, "infinite_ammo": true }"#).unwrap();

        assert_eq!(config.death_grace_ms, 100);
        assert!(config.infinite_ammo);
        assert_eq!(config.detonation_delay_ms, CombatConfig::DEFAULT_DETONATION_DELAY_MS);
        assert_eq!(config.disconnect_blast, CombatConfig::DEFAULT_DISCONNECT_BLAST);
    }
}
