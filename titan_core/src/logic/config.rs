use crate::engine::INF;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Rules, search horizon and heuristic weights of a Titan Clash game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dim: u8,
    pub depth_limit: usize,
    pub starting_life: i32,

    // Combat
    pub base_damage: i32,
    pub emblem_damage: i32, // Against a titan whose weakness emblem is held
    pub shot_damage: i32,
    pub per_turn_damage: i32,
    pub win_utility: f64,

    // Evaluation weights
    pub life_weight: f64,
    pub enemy_weight: f64,
    pub distance_weight: f64,
    pub emblem_weight: f64,
    pub capture_bonus: f64,
    pub smite_penalty: f64,
    pub pantheon_drift_penalty: f64,

    pub shuffle_enemy_moves: bool,
    pub shuffle_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dim: 8,
            depth_limit: 2,
            starting_life: 75,

            base_damage: 8,
            emblem_damage: 3,
            shot_damage: 3,
            per_turn_damage: 1,
            win_utility: 100.0,

            life_weight: 1.0,
            enemy_weight: 20.0,
            distance_weight: 1.5,
            emblem_weight: 5.0,
            capture_bonus: 50.0,
            smite_penalty: 15.0,
            pantheon_drift_penalty: 40.0,

            shuffle_enemy_moves: true,
            shuffle_seed: 0x7469_7461_6e73,
        }
    }
}

impl GameConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_json(&text)
    }

    #[must_use]
    pub const fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The opening layout spans eight columns and eight rows.
        if !(8..=16).contains(&self.dim) {
            return Err(ConfigError::Invalid(format!(
                "dim must be between 8 and 16, got {}",
                self.dim
            )));
        }
        if self.starting_life <= 0 {
            return Err(ConfigError::Invalid(format!(
                "starting_life must be positive, got {}",
                self.starting_life
            )));
        }
        let damages = [
            ("base_damage", self.base_damage),
            ("emblem_damage", self.emblem_damage),
            ("shot_damage", self.shot_damage),
            ("per_turn_damage", self.per_turn_damage),
        ];
        if let Some((name, value)) = damages.iter().find(|(_, v)| *v < 0) {
            return Err(ConfigError::Invalid(format!(
                "{name} must not be negative, got {value}"
            )));
        }
        if !(self.win_utility.is_finite() && self.win_utility > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "win_utility must be a positive number, got {}",
                self.win_utility
            )));
        }
        // The search window sentinel must dominate every real score.
        if self.win_utility * 10.0 >= INF {
            return Err(ConfigError::Invalid(format!(
                "win_utility must stay below {}, got {}",
                INF / 10.0,
                self.win_utility
            )));
        }
        let weights = [
            ("life_weight", self.life_weight),
            ("enemy_weight", self.enemy_weight),
            ("distance_weight", self.distance_weight),
            ("emblem_weight", self.emblem_weight),
            ("capture_bonus", self.capture_bonus),
            ("smite_penalty", self.smite_penalty),
            ("pantheon_drift_penalty", self.pantheon_drift_penalty),
        ];
        if let Some((name, value)) = weights.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be a finite number, got {value}"
            )));
        }
        Ok(())
    }
}
