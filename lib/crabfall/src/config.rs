//! Run configuration, read from JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use blocks::grid::COLS;
use blocks::shape::SHAPE_COUNT;
use blocks::Pos;

use crate::actor::Motion;
use crate::dropper::Cadence;
use crate::script::{ScriptEntry, OPENING};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fall interval must be positive, got {0}")]
    FallInterval(f32),
    #[error("time scale must be positive, got {0}")]
    TimeScale(f32),
    #[error("script entry {index}: shape {shape} out of range (max {max})")]
    Shape { index: usize, shape: u8, max: u8 },
    #[error("script entry {index}: column {column} out of range (max {max})")]
    Column { index: usize, column: u8, max: u8 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub fall_interval: f32,
    pub first_step_at: f32,
    /// Multiplier from total elapsed seconds to the piece clock.
    pub time_scale: f32,
    pub actor_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub actor_spawn: [f32; 2],
    pub script: Vec<ScriptEntry>,
}

impl Default for Config {
    fn default() -> Self {
        let cadence = Cadence::default();
        let motion = Motion::default();
        Self {
            seed: None,
            fall_interval: cadence.interval,
            first_step_at: cadence.first_step_at,
            time_scale: 3.0,
            actor_speed: motion.speed,
            gravity: motion.gravity,
            jump_impulse: motion.jump_impulse,
            actor_spawn: [0.0, -9.0],
            script: OPENING.to_vec(),
        }
    }
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fall_interval > 0.0) {
            return Err(ConfigError::FallInterval(self.fall_interval));
        }
        if !(self.time_scale > 0.0) {
            return Err(ConfigError::TimeScale(self.time_scale));
        }
        for (index, entry) in self.script.iter().enumerate() {
            if entry.shape >= SHAPE_COUNT {
                return Err(ConfigError::Shape {
                    index,
                    shape: entry.shape,
                    max: SHAPE_COUNT - 1,
                });
            }
            if entry.column > COLS {
                return Err(ConfigError::Column {
                    index,
                    column: entry.column,
                    max: COLS,
                });
            }
        }
        Ok(())
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            first_step_at: self.first_step_at,
            interval: self.fall_interval,
        }
    }

    pub fn motion(&self) -> Motion {
        Motion {
            speed: self.actor_speed,
            gravity: self.gravity,
            jump_impulse: self.jump_impulse,
        }
    }

    pub fn actor_spawn(&self) -> Pos {
        let [x, y] = self.actor_spawn;
        Pos::new(x, y)
    }
}

impl FromStr for Config {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = "{}".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.seed, None);
        assert_eq!(config.script.len(), 16);
        assert_eq!(config.cadence(), Cadence::default());
        assert_eq!(config.motion(), Motion::default());
        assert_eq!(config.actor_spawn(), Pos::new(0.0, -9.0));
    }

    #[test]
    fn test_parse() {
        let config: Config = r#"{
            "seed": 42,
            "fallInterval": 0.3,
            "timeScale": 1.0,
            "jumpImpulse": 7.5,
            "actorSpawn": [2.0, -9.0],
            "script": [{"shape": 2, "column": 0}]
        }"#
        .parse()
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.cadence().interval, 0.3);
        assert_eq!(config.cadence().first_step_at, 0.5);
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.motion().jump_impulse, 7.5);
        assert_eq!(config.motion().speed, 4.0);
        assert_eq!(config.actor_spawn(), Pos::new(2.0, -9.0));
        assert_eq!(config.script, [ScriptEntry::new(2, 0)]);
    }

    #[test]
    fn test_display_parses_back() {
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        let again: Config = config.to_string().parse().unwrap();
        assert_eq!(again, config);
        assert!(!Config::default().to_string().contains("seed"));
    }

    #[test]
    fn test_validation() {
        let err = r#"{"fallInterval": 0}"#.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::FallInterval(_)), "{err}");
        let err = r#"{"timeScale": -1}"#.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::TimeScale(_)), "{err}");
        let err = r#"{"script": [{"shape": 1, "column": 0}, {"shape": 19, "column": 0}]}"#
            .parse::<Config>()
            .unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::Shape {
                    index: 1,
                    shape: 19,
                    max: 18
                }
            ),
            "{err}"
        );
        let err = r#"{"script": [{"shape": 1, "column": 11}]}"#
            .parse::<Config>()
            .unwrap_err();
        assert_eq!(err.to_string(), "script entry 0: column 11 out of range (max 10)");
    }

    #[test]
    fn test_parse_error() {
        let err = r#"{"gravity": "down"}"#.parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/crabfall.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
