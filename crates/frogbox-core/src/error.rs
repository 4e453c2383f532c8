//! Error types for configuration loading.

use thiserror::Error;

/// Failure to load or validate a [`crate::config::LevelConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level config field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}
