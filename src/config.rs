//! Simulation configuration
//!
//! Every tunable of the tank game lives here as one immutable value handed to
//! [`GameState`](crate::sim::GameState) at construction, so independent
//! simulations can run side by side.

use std::ops::RangeInclusive;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Edge length of a wall tile
    pub tile_size: f32,

    // === Tanks ===
    /// Edge length of a (square) tank
    pub tank_size: f32,
    pub player_speed: f32,
    pub player_health: u32,
    pub player_lives: u32,
    /// Top-left corner the player starts at and respawns to
    pub player_spawn: Vec2,
    /// Ticks between shots
    pub shoot_delay: u32,
    /// Distance from tank center to the muzzle
    pub muzzle_offset: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_size: f32,

    // === Explosions ===
    /// Lifetime in ticks
    pub explosion_frames: u32,
    pub explosion_radius: f32,

    // === Enemies and waves ===
    pub enemy_health: u32,
    pub base_enemies: u32,
    pub base_enemy_speed: f32,
    /// Added to enemy speed for every level past the first
    pub enemy_speed_step: f32,
    pub initial_move_interval: u32,
    pub min_ai_interval: u32,
    pub max_ai_interval: u32,
    /// Enemy spawn band (top-left corner, inclusive)
    pub enemy_spawn_min: Vec2,
    pub enemy_spawn_max: Vec2,
    pub score_per_kill: u64,

    // === Terrain ===
    /// Brick/Stone tiles scattered per level
    pub terrain_tiles: u32,
    pub grass_tiles: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            tile_size: 40.0,

            tank_size: 35.0,
            player_speed: 3.0,
            player_health: 3,
            player_lives: 3,
            player_spawn: Vec2::new(400.0, 520.0),
            shoot_delay: 30,
            muzzle_offset: 20.0,

            bullet_speed: 8.0,
            bullet_size: 6.0,

            explosion_frames: 20,
            explosion_radius: 40.0,

            enemy_health: 1,
            base_enemies: 3,
            base_enemy_speed: 2.0,
            enemy_speed_step: 0.5,
            initial_move_interval: 120,
            min_ai_interval: 60,
            max_ai_interval: 180,
            enemy_spawn_min: Vec2::new(50.0, 50.0),
            enemy_spawn_max: Vec2::new(700.0, 200.0),
            score_per_kill: 100,

            terrain_tiles: 15,
            grass_tiles: 10,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the constraints level generation and movement rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("tile_size", self.tile_size),
            ("tank_size", self.tank_size),
            ("bullet_size", self.bullet_size),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }

        // Random tiles are drawn from columns 1..=cols-2 and rows 3..=rows-3
        if self.columns() < 3 || self.rows() < 6 {
            return Err(ConfigError::Invalid(format!(
                "playfield of {}x{} tiles is too small",
                self.columns(),
                self.rows()
            )));
        }
        if self.tank_size > self.screen_width || self.tank_size > self.screen_height {
            return Err(ConfigError::Invalid("tank_size exceeds the playfield".into()));
        }
        if self.player_health == 0 || self.player_lives == 0 || self.enemy_health == 0 {
            return Err(ConfigError::Invalid(
                "health and lives must be at least 1".into(),
            ));
        }
        if self.min_ai_interval > self.max_ai_interval {
            return Err(ConfigError::Invalid(format!(
                "min_ai_interval {} exceeds max_ai_interval {}",
                self.min_ai_interval, self.max_ai_interval
            )));
        }
        if self.enemy_spawn_min.x > self.enemy_spawn_max.x
            || self.enemy_spawn_min.y > self.enemy_spawn_max.y
        {
            return Err(ConfigError::Invalid("empty enemy spawn band".into()));
        }
        Ok(())
    }

    /// Playfield size as a vector
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Number of whole tile columns across the screen
    pub fn columns(&self) -> u32 {
        (self.screen_width / self.tile_size) as u32
    }

    /// Number of whole tile rows down the screen
    pub fn rows(&self) -> u32 {
        (self.screen_height / self.tile_size) as u32
    }

    /// Range the AI redraws its move/shoot intervals from
    pub fn ai_interval_range(&self) -> RangeInclusive<u32> {
        self.min_ai_interval..=self.max_ai_interval
    }

    /// Number of enemies in the wave for `level` (1-based)
    pub fn enemies_for_level(&self, level: u32) -> u32 {
        self.base_enemies + level.saturating_sub(1)
    }

    /// Enemy speed for `level` (1-based)
    pub fn enemy_speed_for_level(&self, level: u32) -> f32 {
        self.base_enemy_speed + level.saturating_sub(1) as f32 * self.enemy_speed_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns(), 20);
        assert_eq!(config.rows(), 15);
    }

    #[test]
    fn test_wave_sizing() {
        let config = SimConfig::default();
        assert_eq!(config.enemies_for_level(1), 3);
        assert_eq!(config.enemies_for_level(3), 5);
        assert_eq!(config.enemy_speed_for_level(1), 2.0);
        assert_eq!(config.enemy_speed_for_level(3), 3.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{ "player_lives": 5, "base_enemies": 1 }"#)
            .expect("partial config should parse");
        assert_eq!(config.player_lives, 5);
        assert_eq!(config.base_enemies, 1);
        assert_eq!(config.tile_size, 40.0);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SimConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_interval() {
        let config = SimConfig {
            min_ai_interval: 200,
            max_ai_interval: 100,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_tiny_playfield() {
        let config = SimConfig {
            screen_width: 80.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let config = SimConfig {
            score_per_kill: 250,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let parsed = SimConfig::from_json(&json).expect("parse");
        assert_eq!(parsed, config);
    }
}
