//! Engine configuration.
//!
//! Tunables live in a JSON document. A builtin copy ships with the crate;
//! any field missing from a user file falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BUILTIN_ENGINE_CONFIG: &str = include_str!("data/engine_config.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read engine config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{field} must be between 0 and 1, got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of each hull's population that dies of natural causes per turn.
    pub natural_death_rate: f64,
    /// Highest orbit at which orbital colonies run farms on sunlight.
    pub solar_orbit_limit: u8,
    /// Resolve independent hulls on the rayon pool.
    pub parallel_hulls: bool,
    /// Phases run when the caller does not name any.
    pub default_phases: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            natural_death_rate: 0.0025,
            solar_orbit_limit: 5,
            parallel_hulls: false,
            default_phases: [
                "fuel-allocation",
                "life-support",
                "assembly",
                "retool",
                "control",
                "farm-production",
                "mine-production",
                "factory-production",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl EngineConfig {
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_ENGINE_CONFIG).unwrap_or_default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.natural_death_rate) {
            return Err(ConfigError::OutOfRange {
                field: "natural_death_rate",
                value: self.natural_death_rate,
            });
        }
        Ok(())
    }

    /// The default phase list as borrowed names.
    pub fn default_phase_names(&self) -> Vec<&str> {
        self.default_phases.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_default() {
        let parsed: EngineConfig = serde_json::from_str(BUILTIN_ENGINE_CONFIG).unwrap();
        assert_eq!(parsed, EngineConfig::default());
        assert_eq!(EngineConfig::builtin(), parsed);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = EngineConfig::from_json_str(r#"{"parallel_hulls": true}"#).unwrap();
        assert!(config.parallel_hulls);
        assert_eq!(config.solar_orbit_limit, 5);
        assert_eq!(config.default_phases.len(), 8);
    }

    #[test]
    fn rejects_bad_death_rate() {
        let err = EngineConfig::from_json_str(r#"{"natural_death_rate": 1.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "natural_death_rate", .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{"solar_orbit_limit": 3}"#).unwrap();
        assert_eq!(EngineConfig::from_file(&path).unwrap().solar_orbit_limit, 3);
        assert!(matches!(
            EngineConfig::from_file(&dir.path().join("missing.json")),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
