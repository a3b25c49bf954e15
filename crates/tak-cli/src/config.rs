//! Terminal host configuration, read from the environment.

use tak_core::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use thiserror::Error;

const BOARD_SIZE_VAR: &str = "TAK_BOARD_SIZE";
const SHOW_ROADS_VAR: &str = "TAK_SHOW_ROADS";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TAK_BOARD_SIZE must be a number from 3 to 9, got {0:?}")]
    BoardSize(String),

    #[error("TAK_SHOW_ROADS must be 1, 0, true or false, got {0:?}")]
    ShowRoads(String),
}

/// Settings for one terminal session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size of the first game; `new <size>` can change it later
    pub board_size: usize,
    /// Print road links under the board after every command
    pub show_roads: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            show_roads: false,
        }
    }
}

impl Config {
    /// Load configuration from `TAK_BOARD_SIZE` and `TAK_SHOW_ROADS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BOARD_SIZE_VAR) {
            config.board_size = match raw.trim().parse::<usize>() {
                Ok(size) if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) => size,
                _ => return Err(ConfigError::BoardSize(raw)),
            };
        }

        if let Some(raw) = lookup(SHOW_ROADS_VAR) {
            config.show_roads = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => true,
                "0" | "false" | "" => false,
                _ => return Err(ConfigError::ShowRoads(raw)),
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), Config::default());
        assert_eq!(Config::default().board_size, 5);
    }

    #[test]
    fn test_reads_both_variables() {
        let config = load(&[("TAK_BOARD_SIZE", "7"), ("TAK_SHOW_ROADS", "TRUE")]).unwrap();
        assert_eq!(config.board_size, 7);
        assert!(config.show_roads);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            load(&[("TAK_BOARD_SIZE", "12")]),
            Err(ConfigError::BoardSize("12".into()))
        );
        assert_eq!(
            load(&[("TAK_BOARD_SIZE", "five")]),
            Err(ConfigError::BoardSize("five".into()))
        );
        assert_eq!(
            load(&[("TAK_SHOW_ROADS", "maybe")]),
            Err(ConfigError::ShowRoads("maybe".into()))
        );
    }
}
