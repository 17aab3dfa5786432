//! Shared fixtures for lifecycle integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use vigil_core::{ResourceMetadata, SupportCriterion};
use vigil_resource::{
    CommandOutput, Connection, Context, MockConnection, Platform, PlatformFacts, Resource,
    ResourceResult, TransportError,
};

/// A real (non-mock) target with fixed facts and no command support.
#[derive(Debug)]
pub struct StaticConnection {
    pub platform: PlatformFacts,
}

#[async_trait]
impl Connection for StaticConnection {
    fn platform(&self) -> &dyn Platform {
        &self.platform
    }

    async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError> {
        Err(TransportError::not_implemented(format!("command `{command}`")))
    }
}

pub fn real(platform: PlatformFacts) -> Context {
    Context::from_connection(StaticConnection { platform })
}

pub fn mock(platform: PlatformFacts) -> Context {
    Context::from_connection(MockConnection::new(platform))
}

pub fn windows() -> PlatformFacts {
    PlatformFacts::new("windows_server_2019", "10.0.17763").with_families(["windows", "os"])
}

pub fn linux() -> PlatformFacts {
    PlatformFacts::new("ubuntu", "18.04").with_families(["debian", "linux", "unix", "os"])
}

pub fn metadata(name: &str, supports: &[SupportCriterion]) -> Arc<ResourceMetadata> {
    let builder = supports
        .iter()
        .cloned()
        .fold(ResourceMetadata::builder(name), |b, c| b.supports(c));
    Arc::new(builder.build().unwrap())
}

/// What a [`Scripted`] initializer should do.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Succeed,
    Skip(String),
    Fail(String),
    CallApi(String),
    Crash(String),
}

/// Resource whose initializer follows a [`Script`].
#[derive(Debug)]
pub struct Scripted;

impl Resource for Scripted {
    type Params = Script;

    async fn init(ctx: &Context, script: Script) -> ResourceResult<Self> {
        match script {
            Script::Succeed => Ok(Self),
            Script::Skip(msg) => Err(vigil_resource::ResourceError::skip(msg)),
            Script::Fail(msg) => Err(vigil_resource::ResourceError::fail(msg)),
            Script::CallApi(op) => {
                ctx.invoke(&op, serde_json::Value::Null).await?;
                Ok(Self)
            }
            Script::Crash(msg) => Err(vigil_resource::ResourceError::other(
                std::io::Error::other(msg),
            )),
        }
    }
}

/// Resource whose initializer must never run.
#[derive(Debug)]
pub struct Untouched;

impl Resource for Untouched {
    type Params = ();

    async fn init(_ctx: &Context, _params: ()) -> ResourceResult<Self> {
        panic!("initializer ran for a resource that should have been skipped")
    }
}
