//! Transport boundary.
//!
//! Vigil does not detect platforms or execute anything itself. A
//! [`Connection`] supplies platform facts and runs commands or API calls
//! against the target; resources reach it through their
//! [`Context`](crate::Context).

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::platform::Platform;

/// Output of a command executed on the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: i32,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Failed output with the given status and stderr.
    pub fn failure(exit_status: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_status,
            ..Self::default()
        }
    }

    /// Whether the command exited with status 0.
    pub fn is_success(&self) -> bool {
        self.exit_status == 0
    }

    /// Turn a non-zero exit status into [`TransportError::CommandFailed`].
    pub fn check(self, command: &str) -> Result<Self, TransportError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(TransportError::CommandFailed {
            command: command.to_string(),
            exit_status: self.exit_status,
            stderr: self.stderr.trim_end().to_string(),
        })
    }
}

/// A live connection to the target being checked.
///
/// Connections are shared by every resource instance of a run. Vigil does not
/// serialize access, so implementations must be safe for concurrent use.
#[async_trait]
pub trait Connection: Send + Sync + fmt::Debug {
    /// Facts about the target platform.
    fn platform(&self) -> &dyn Platform;

    /// Run a shell command on the target.
    async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError>;

    /// Call an API operation on API-backed targets (cloud accounts).
    async fn invoke(
        &self,
        operation: &str,
        _request: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        Err(TransportError::not_implemented(operation))
    }

    /// Whether this is a test/mock harness rather than a real target.
    fn is_mock(&self) -> bool {
        false
    }
}
