//! Runtime context handed to every resource instance

use std::sync::Arc;

use crate::connection::{CommandOutput, Connection};
use crate::error::TransportError;
use crate::platform::Platform;

/// Runtime context for resource construction.
///
/// Wraps the shared [`Connection`] of the current run. Cloning is cheap and
/// every clone refers to the same connection.
#[derive(Clone)]
pub struct Context {
    connection: Arc<dyn Connection>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("connection", &self.connection)
            .field("mock", &self.connection.is_mock())
            .finish()
    }
}

impl Context {
    /// Create a context around a shared connection.
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Create a context that owns `connection`.
    pub fn from_connection<C: Connection + 'static>(connection: C) -> Self {
        Self::new(Arc::new(connection))
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Facts about the target platform.
    pub fn platform(&self) -> &dyn Platform {
        self.connection.platform()
    }

    /// Whether the run targets a test/mock harness.
    pub fn is_mock(&self) -> bool {
        self.connection.is_mock()
    }

    /// Run a shell command on the target.
    pub async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError> {
        self.connection.run_command(command).await
    }

    /// Call an API operation on the target.
    pub async fn invoke(
        &self,
        operation: &str,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        self.connection.invoke(operation, request).await
    }
}
