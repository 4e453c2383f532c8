//! Errors surfaced by the runner.

use thiserror::Error;

use frogbox_core::error::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("level config: {0}")]
    Config(#[from] ConfigError),

    #[error("bad command {line:?}: {source}")]
    Command {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotRunning,

    #[error("game loop channel closed")]
    ChannelClosed,

    #[error("shared state lock poisoned")]
    LockPoisoned,
}
