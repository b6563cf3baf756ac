//! Engine tuning.

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::models::DEFAULT_REGULATION_ROUNDS;

pub const CONFIG_PATH_ENV: &str = "SHOOTOUT_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rounds before sudden death (기본: 5)
    pub regulation_rounds: u32,
    /// Chance a player kick goes wide regardless of the keeper (기본: 0.06)
    pub player_miss_chance: f64,
    /// Chance a wrong-footed keeper still dives next to the target (기본: 0.4)
    pub adjacent_dive_chance: f64,
    pub player_name: String,
    pub opponent_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regulation_rounds: DEFAULT_REGULATION_ROUNDS,
            player_miss_chance: 0.06,
            adjacent_dive_chance: 0.4,
            player_name: "You".to_string(),
            opponent_name: "CPU".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.regulation_rounds == 0 {
            return Err("regulation_rounds must be at least 1".to_string());
        }
        for (name, p) in [
            ("player_miss_chance", self.player_miss_chance),
            ("adjacent_dive_chance", self.adjacent_dive_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must be within [0, 1], got {}", name, p));
            }
        }
        if self.player_name.trim().is_empty() || self.opponent_name.trim().is_empty() {
            return Err("player and opponent names must not be empty".to_string());
        }
        Ok(())
    }

    /// Read and validate a JSON config file.
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read engine config '{path}': {e}"))?;

        let config = Self::from_json(&content)
            .map_err(|e| format!("Failed to parse engine config '{path}': {e}"))?;

        config.validate().map_err(|e| format!("Invalid engine config '{path}': {e}"))?;
        Ok(config)
    }

    /// Config from the file named by `SHOOTOUT_CONFIG_PATH`, or the default
    /// when the variable is unset or blank.
    pub fn from_env() -> Result<Self, String> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        Self::from_file(path).map_err(|e| format!("{CONFIG_PATH_ENV}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.regulation_rounds, 5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "regulation_rounds": 3 }"#).unwrap();
        assert_eq!(config.regulation_rounds, 3);
        assert_eq!(config.player_miss_chance, 0.06);
        assert_eq!(config.opponent_name, "CPU");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_rounds = EngineConfig { regulation_rounds: 0, ..Default::default() };
        assert!(zero_rounds.validate().is_err());

        let bad_prob = EngineConfig { adjacent_dive_chance: 1.5, ..Default::default() };
        assert!(bad_prob.validate().unwrap_err().contains("adjacent_dive_chance"));

        let no_name = EngineConfig { player_name: "  ".to_string(), ..Default::default() };
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.json");
        let config = EngineConfig { opponent_name: "Keeper Bot".to_string(), ..Default::default() };
        fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = EngineConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, config);

        fs::write(&path, r#"{ "player_miss_chance": -1 }"#).unwrap();
        let err = EngineConfig::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(err.starts_with("Invalid engine config"));
    }
}
