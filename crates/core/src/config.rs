//! Engine tuning loaded from TOML.
//! Every field has a default, so an empty file is a valid config.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{ENEMY_HP_PER_FLOOR, EnemyArchetype};

const MIN_FLOOR_SIDE: usize = 3;
const MAX_FLOOR_SIDE: usize = 1024;
/// Ceiling for starting hp and the first threshold, far below where level-ups could overflow.
const MAX_START_STAT: i32 = 1_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyHpScaling {
    /// `base_hp + (floor - 1) * 2`
    #[default]
    PerFloor,
    Flat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub floor_width: usize,
    pub floor_height: usize,
    pub enemies_per_floor: usize,
    pub potions_per_floor: usize,
    pub fov_radius: i32,
    pub auto_run_step_ms: u64,
    pub enemy_hp_scaling: EnemyHpScaling,
    pub player_start_hp: i32,
    pub first_level_threshold: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            floor_width: 120,
            floor_height: 40,
            enemies_per_floor: 3,
            potions_per_floor: 3,
            fov_radius: 5,
            auto_run_step_ms: 150,
            enemy_hp_scaling: EnemyHpScaling::PerFloor,
            player_start_hp: 20,
            first_level_threshold: 20,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = MIN_FLOOR_SIDE..=MAX_FLOOR_SIDE;
        if !sides.contains(&self.floor_width) || !sides.contains(&self.floor_height) {
            return Err(ConfigError::Invalid(format!(
                "floor sides must be within {MIN_FLOOR_SIDE}..={MAX_FLOOR_SIDE}, got {}x{}",
                self.floor_width, self.floor_height
            )));
        }
        let max_radius = self.floor_width.max(self.floor_height) as i32;
        if !(1..=max_radius).contains(&self.fov_radius) {
            return Err(ConfigError::Invalid(format!(
                "fov_radius must be within 1..={max_radius}, got {}",
                self.fov_radius
            )));
        }
        if !(1..=MAX_START_STAT).contains(&self.player_start_hp) {
            return Err(ConfigError::Invalid(format!(
                "player_start_hp must be within 1..={MAX_START_STAT}, got {}",
                self.player_start_hp
            )));
        }
        if !(1..=MAX_START_STAT).contains(&self.first_level_threshold) {
            return Err(ConfigError::Invalid(format!(
                "first_level_threshold must be within 1..={MAX_START_STAT}, got {}",
                self.first_level_threshold
            )));
        }
        Ok(())
    }

    pub fn auto_run_step(&self) -> Duration {
        Duration::from_millis(self.auto_run_step_ms)
    }

    pub fn enemy_hp(&self, archetype: EnemyArchetype, floor_index: u32) -> i32 {
        let base = archetype.stats().base_hp;
        match self.enemy_hp_scaling {
            EnemyHpScaling::PerFloor => {
                let depth = i32::try_from(floor_index.saturating_sub(1)).unwrap_or(i32::MAX / 4);
                base.saturating_add(depth.saturating_mul(ENEMY_HP_PER_FLOOR))
            }
            EnemyHpScaling::Flat => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = EngineConfig::from_toml_str(
            "floor_width = 40\nenemy_hp_scaling = \"flat\"\nauto_run_step_ms = 0\n",
        )
        .expect("partial config parses");
        assert_eq!(config.floor_width, 40);
        assert_eq!(config.floor_height, 40);
        assert_eq!(config.enemy_hp_scaling, EnemyHpScaling::Flat);
        assert_eq!(config.auto_run_step(), Duration::ZERO);
    }

    #[test]
    fn tiny_floor_is_rejected() {
        let err = EngineConfig::from_toml_str("floor_width = 2").expect_err("too narrow");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err}");
        let config = EngineConfig::from_toml_str("floor_width = 3\nfloor_height = 5\n")
            .expect("a single corridor row is enough");
        assert_eq!((config.floor_width, config.floor_height), (3, 5));
    }

    #[test]
    fn oversized_values_are_rejected() {
        for text in [
            "fov_radius = 50000",
            "floor_width = 5000",
            "player_start_hp = 2147483647",
            "first_level_threshold = 2000000000",
        ] {
            let err = EngineConfig::from_toml_str(text).expect_err(text);
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
        }
        let config =
            EngineConfig::from_toml_str("fov_radius = 120").expect("radius up to the long side");
        assert_eq!(config.fov_radius, 120);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("floor_width = [").expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = EngineConfig::load(&path).expect_err("file does not exist");
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        fs::write(&path, "fov_radius = 7\n").unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.fov_radius, 7);
    }

    #[test]
    fn enemy_hp_scales_with_depth_only_in_per_floor_mode() {
        let per_floor = EngineConfig::default();
        assert_eq!(per_floor.enemy_hp(EnemyArchetype::Goblin, 1), 8);
        assert_eq!(per_floor.enemy_hp(EnemyArchetype::Goblin, 4), 14);

        let flat = EngineConfig { enemy_hp_scaling: EnemyHpScaling::Flat, ..per_floor };
        assert_eq!(flat.enemy_hp(EnemyArchetype::Troll, 9), 20);
    }
}
