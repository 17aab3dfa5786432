//! Error types for resource construction and transport access
use thiserror::Error;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors raised by the transport collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport does not provide this operation
    #[error("operation '{operation}' is not available on this connection")]
    NotImplemented {
        /// The requested operation
        operation: String,
    },

    /// A command ran but exited unsuccessfully
    #[error("command `{command}` exited with status {exit_status}: {stderr}")]
    CommandFailed {
        /// The command line
        command: String,
        /// Exit status reported by the target
        exit_status: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The target could not be reached
    #[error("connection error: {0}")]
    Connection(String),
}

impl TransportError {
    /// Create a not-implemented error for `operation`
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }
}

/// Outcome signals and errors of a resource initializer.
///
/// [`Skipped`](Self::Skipped) and [`Failed`](Self::Failed) are not errors to
/// the caller: the lifecycle turns them into instance state. Every other
/// variant aborts construction and is returned as-is.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource does not apply to this target
    #[error("{0}")]
    Skipped(String),

    /// The resource applies but could not be evaluated
    #[error("{0}")]
    Failed(String),

    /// The transport raised an error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Constructor arguments did not match the resource's parameters
    #[error("invalid parameters for resource '{resource}': {reason}")]
    InvalidParams {
        /// The resource name
        resource: String,
        /// Why the arguments were rejected
        reason: String,
    },

    /// Any other error
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ResourceError {
    /// Signal that the resource should be skipped
    pub fn skip(message: impl Into<String>) -> Self {
        Self::Skipped(message.into())
    }

    /// Signal that the resource failed
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wrap an arbitrary error
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }

    /// Whether this is a skip or fail signal rather than a real error
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Skipped(_) | Self::Failed(_))
    }

    /// Whether the transport reported a missing operation
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::Transport(TransportError::NotImplemented { .. }))
    }
}
