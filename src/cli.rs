// CLI module for argument parsing and configuration

use crate::config::SwipeConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default horizontal distance one drag keypress moves the card
pub const DEFAULT_DRAG_STEP: f64 = 50.0;

/// Veer - swipe through a stack of candidates from the terminal
///
/// Drag the top card past the threshold to like or pass, or use the
/// action keys to decide instantly.
#[derive(Parser, Debug, Clone)]
#[command(name = "veer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with the candidates to review
    ///
    /// If not specified, a built-in sample stack is used.
    #[arg(short = 'c', long = "candidates")]
    pub candidates: Option<PathBuf>,

    /// Drag distance a release must exceed to commit a decision
    #[arg(long = "threshold")]
    pub threshold: Option<f64>,

    /// Offset a decided card is sent to when it leaves the stack
    #[arg(long = "exit-distance")]
    pub exit_distance: Option<f64>,

    /// Grace period in milliseconds before a decided card is removed
    #[arg(long = "removal-delay-ms")]
    pub removal_delay_ms: Option<u64>,

    /// Distance one drag keypress moves the card
    #[arg(long = "drag-step", default_value_t = DEFAULT_DRAG_STEP)]
    pub drag_step: f64,

    /// Show the welcome screen even if it was dismissed before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,

    /// Write logs to this file (filter with VEER_LOG)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.candidates {
            if !path.exists() {
                return Err(format!("Candidates file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Candidates path is not a file: {}", path.display()));
            }
        }

        if !self.drag_step.is_finite() || self.drag_step <= 0.0 {
            return Err(format!(
                "Invalid drag-step: {}. It must be a positive number",
                self.drag_step
            ));
        }

        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err(format!(
                    "Invalid threshold: {}. It must be a positive number",
                    threshold
                ));
            }
        }

        if let (Some(threshold), Some(exit)) = (self.threshold, self.exit_distance) {
            if exit <= threshold {
                return Err(format!(
                    "exit-distance ({}) must be greater than threshold ({})",
                    exit, threshold
                ));
            }
        }

        Ok(())
    }

    /// Applies the command line overrides on top of `base`
    pub fn swipe_config(&self, base: &SwipeConfig) -> SwipeConfig {
        SwipeConfig {
            decision_threshold: self.threshold.unwrap_or(base.decision_threshold),
            exit_displacement: self.exit_distance.unwrap_or(base.exit_displacement),
            removal_delay_ms: self.removal_delay_ms.unwrap_or(base.removal_delay_ms),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub candidates: Option<PathBuf>,
    pub swipe: SwipeConfig,
    pub drag_step: f64,
    pub show_welcome: bool,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merges arguments with the swipe settings stored in the user config
    pub fn from_args(args: Args, base: &SwipeConfig) -> Self {
        AppConfig {
            swipe: args.swipe_config(base),
            candidates: args.candidates,
            drag_step: args.drag_step,
            show_welcome: args.show_welcome,
            log_file: args.log_file,
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig::from_args(args, &SwipeConfig::default())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            candidates: None,
            swipe: SwipeConfig::default(),
            drag_step: DEFAULT_DRAG_STEP,
            show_welcome: false,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_args() -> Args {
        Args {
            candidates: None,
            threshold: None,
            exit_distance: None,
            removal_delay_ms: None,
            drag_step: DEFAULT_DRAG_STEP,
            show_welcome: false,
            log_file: None,
        }
    }

    mod args_tests {
        use super::*;

        #[test]
        fn test_parse_defaults() {
            let args = Args::try_parse_from(["veer"]).unwrap();
            assert!(args.candidates.is_none());
            assert_eq!(args.drag_step, DEFAULT_DRAG_STEP);
            assert!(!args.show_welcome);
        }

        #[test]
        fn test_parse_overrides() {
            let args = Args::try_parse_from([
                "veer",
                "--candidates",
                "people.json",
                "--threshold",
                "120",
                "--exit-distance",
                "500",
                "--removal-delay-ms",
                "400",
                "--welcome",
            ])
            .unwrap();

            assert_eq!(args.candidates, Some(PathBuf::from("people.json")));
            assert_eq!(args.threshold, Some(120.0));
            assert_eq!(args.exit_distance, Some(500.0));
            assert_eq!(args.removal_delay_ms, Some(400));
            assert!(args.show_welcome);
        }

        #[test]
        fn test_validate_default_args() {
            assert!(base_args().validate().is_ok());
        }

        #[test]
        fn test_validate_missing_candidates_file() {
            let args = Args {
                candidates: Some(PathBuf::from("/nonexistent/path/12345.json")),
                ..base_args()
            };

            let result = args.validate();
            assert!(result.is_err());
            assert!(result.unwrap_err().contains("does not exist"));
        }

        #[test]
        fn test_validate_candidates_is_directory() {
            let temp_dir = TempDir::new().unwrap();
            let args = Args {
                candidates: Some(temp_dir.path().to_path_buf()),
                ..base_args()
            };

            assert!(args.validate().unwrap_err().contains("not a file"));
        }

        #[test]
        fn test_validate_non_positive_drag_step() {
            let args = Args {
                drag_step: 0.0,
                ..base_args()
            };
            assert!(args.validate().unwrap_err().contains("drag-step"));
        }

        #[test]
        fn test_validate_negative_threshold() {
            let args = Args {
                threshold: Some(-5.0),
                ..base_args()
            };
            assert!(args.validate().unwrap_err().contains("threshold"));
        }

        #[test]
        fn test_validate_exit_inside_threshold() {
            let args = Args {
                threshold: Some(300.0),
                exit_distance: Some(200.0),
                ..base_args()
            };
            assert!(args
                .validate()
                .unwrap_err()
                .contains("must be greater than threshold"));
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_app_config_from_args_keeps_base_values() {
            let base = SwipeConfig {
                decision_threshold: 100.0,
                exit_displacement: 500.0,
                removal_delay_ms: 400,
            };
            let args = Args {
                removal_delay_ms: Some(250),
                ..base_args()
            };

            let config = AppConfig::from_args(args, &base);

            assert_eq!(config.swipe.decision_threshold, 100.0);
            assert_eq!(config.swipe.exit_displacement, 500.0);
            assert_eq!(config.swipe.removal_delay_ms, 250);
        }

        #[test]
        fn test_app_config_from_args() {
            let args = Args {
                candidates: Some(PathBuf::from("/test/people.json")),
                threshold: Some(120.0),
                show_welcome: true,
                ..base_args()
            };

            let config: AppConfig = args.into();

            assert_eq!(config.candidates, Some(PathBuf::from("/test/people.json")));
            assert_eq!(config.swipe.decision_threshold, 120.0);
            assert_eq!(config.swipe.exit_displacement, 600.0);
            assert!(config.show_welcome);
        }

        #[test]
        fn test_app_config_default() {
            let config = AppConfig::default();

            assert!(config.candidates.is_none());
            assert_eq!(config.swipe, SwipeConfig::default());
            assert_eq!(config.drag_step, DEFAULT_DRAG_STEP);
            assert!(config.log_file.is_none());
        }
    }
}
