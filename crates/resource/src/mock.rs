//! Mock connection for testing resources without a real target

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::connection::{CommandOutput, Connection};
use crate::error::TransportError;
use crate::platform::{Platform, PlatformFacts};

/// Record of a call made through a [`MockConnection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Command {
        command: String,
    },
    Invoke {
        operation: String,
        request: serde_json::Value,
    },
}

/// A [`Connection`] that serves canned responses.
///
/// Reports itself as a mock, which relaxes platform gating and (by default)
/// turns "not implemented" errors into skips during construction. Anything
/// not stubbed returns [`TransportError::NotImplemented`].
#[derive(Debug, Clone)]
pub struct MockConnection {
    platform: PlatformFacts,
    commands: HashMap<String, CommandOutput>,
    operations: HashMap<String, serde_json::Value>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockConnection {
    pub fn new(platform: PlatformFacts) -> Self {
        Self {
            platform,
            commands: HashMap::new(),
            operations: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stub the output of `command`.
    pub fn with_command(mut self, command: impl Into<String>, output: CommandOutput) -> Self {
        self.commands.insert(command.into(), output);
        self
    }

    /// Stub the response of API `operation`.
    pub fn with_operation(
        mut self,
        operation: impl Into<String>,
        response: serde_json::Value,
    ) -> Self {
        self.operations.insert(operation.into(), response);
        self
    }

    /// Every call made so far, in order.
    pub fn call_history(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn clear_history(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn platform(&self) -> &dyn Platform {
        &self.platform
    }

    async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError> {
        self.calls.lock().push(MockCall::Command {
            command: command.to_string(),
        });
        self.commands
            .get(command)
            .cloned()
            .ok_or_else(|| TransportError::not_implemented(format!("command `{command}`")))
    }

    async fn invoke(
        &self,
        operation: &str,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError> {
        self.calls.lock().push(MockCall::Invoke {
            operation: operation.to_string(),
            request,
        });
        self.operations
            .get(operation)
            .cloned()
            .ok_or_else(|| TransportError::not_implemented(operation))
    }

    fn is_mock(&self) -> bool {
        true
    }
}
