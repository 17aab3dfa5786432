//! Logging errors.

/// Errors raised while installing or adjusting the logger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// The level/filter directive string could not be parsed.
    #[error("invalid log filter {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("failed to install logger: {0}")]
    Init(String),

    /// The running filter could not be replaced.
    #[error("failed to reload log filter: {0}")]
    Reload(String),
}

/// Result type for logging setup.
pub type LogResult<T> = Result<T, LogError>;
