//! Registry error types.

use vigil_core::ResourceKeyError;
use vigil_resource::ResourceError;

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// No resource type is registered under this name.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The name is not a valid resource name.
    #[error("invalid resource name: {0}")]
    InvalidKey(#[from] ResourceKeyError),

    /// The resource initializer raised an error that is neither a skip nor
    /// a failure signal.
    #[error("failed to construct resource: {0}")]
    Construction(#[from] ResourceError),
}

impl PluginError {
    /// The initializer error, if construction was aborted.
    pub fn as_construction(&self) -> Option<&ResourceError> {
        match self {
            Self::Construction(err) => Some(err),
            _ => None,
        }
    }
}
