//! User configuration and swipe tuning

use crate::error::{Result, VeerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default horizontal distance a release must exceed to commit a decision.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 150.0;
/// Default off-stage offset a decided card is sent to.
pub const DEFAULT_EXIT_DISPLACEMENT: f64 = 600.0;
/// Default grace period between settlement and removal.
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 300;

/// Tunable constants of the swipe engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub decision_threshold: f64,
    pub exit_displacement: f64,
    pub removal_delay_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            exit_displacement: DEFAULT_EXIT_DISPLACEMENT,
            removal_delay_ms: DEFAULT_REMOVAL_DELAY_MS,
        }
    }
}

impl SwipeConfig {
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }

    /// Checks that the thresholds describe a usable gesture.
    ///
    /// The exit offset has to clear the decision threshold, otherwise a
    /// committed card would come to rest inside the commit zone.
    pub fn validate(&self) -> Result<()> {
        if !self.decision_threshold.is_finite() || self.decision_threshold <= 0.0 {
            return Err(VeerError::InvalidConfig {
                field: "decision_threshold".to_string(),
                message: format!("must be a positive number, got {}", self.decision_threshold),
            });
        }

        if !self.exit_displacement.is_finite() || self.exit_displacement <= self.decision_threshold
        {
            return Err(VeerError::InvalidConfig {
                field: "exit_displacement".to_string(),
                message: format!(
                    "must be greater than the decision threshold ({}), got {}",
                    self.decision_threshold, self.exit_displacement
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Whether the welcome dialog has been shown
    #[serde(default)]
    pub welcome_shown: bool,
    /// Swipe tuning, overridable from the command line
    #[serde(default)]
    pub swipe: SwipeConfig,
}

impl UserConfig {
    /// Get the config file path (~/.config/veer/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("veer").join("config.json"))
    }

    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            VeerError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            VeerError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            VeerError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        config.swipe.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            VeerError::ConfigError("Could not determine config directory".to_string())
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                VeerError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VeerError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            VeerError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.welcome_shown);
        assert_eq!(config.swipe.decision_threshold, 150.0);
        assert_eq!(config.swipe.exit_displacement, 600.0);
        assert_eq!(config.swipe.removal_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_config_serialization() {
        let config = UserConfig {
            welcome_shown: true,
            swipe: SwipeConfig {
                decision_threshold: 120.0,
                exit_displacement: 500.0,
                removal_delay_ms: 400,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UserConfig = serde_json::from_str(&json).unwrap();
        assert!(deserialized.welcome_shown);
        assert_eq!(deserialized.swipe, config.swipe);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: UserConfig =
            serde_json::from_str(r#"{"swipe": {"removal_delay_ms": 400}}"#).unwrap();
        assert!(!config.welcome_shown);
        assert_eq!(config.swipe.removal_delay_ms, 400);
        assert_eq!(config.swipe.decision_threshold, DEFAULT_DECISION_THRESHOLD);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = UserConfig::load_from(&temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(config.swipe, SwipeConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = UserConfig {
            welcome_shown: true,
            swipe: SwipeConfig::default(),
        };
        config.save_to(&path).unwrap();

        let loaded = UserConfig::load_from(&path).unwrap();
        assert!(loaded.welcome_shown);
    }

    #[test]
    fn test_load_rejects_invalid_swipe_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"swipe": {"decision_threshold": 700.0}}"#).unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, VeerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_reports_parse_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_validate_rejects_non_positive_threshold() {
        let config = SwipeConfig {
            decision_threshold: 0.0,
            ..SwipeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_exit_inside_threshold() {
        let config = SwipeConfig {
            decision_threshold: 150.0,
            exit_displacement: 150.0,
            removal_delay_ms: 300,
        };
        assert!(config.validate().is_err());
    }
}
