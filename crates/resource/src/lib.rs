//! # Vigil Resource
//!
//! Runtime side of the Vigil resource-plugin framework: the transport
//! boundary resources talk to, platform-support gating, and the lifecycle
//! that turns a user-authored [`Resource`] into an [`Instance`] that is
//! active, skipped or failed.
//!
//! Skips and failures never abort a run. They are recorded on the instance
//! for the caller to report. Only unexpected initializer errors propagate.

pub mod config;
pub mod connection;
pub mod context;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod mock;
pub mod platform;
pub mod resource;
pub mod support;

pub use config::{LifecycleConfig, MAX_EVENT_BUFFER};
pub use connection::{CommandOutput, Connection};
pub use context::Context;
pub use error::{ResourceError, ResourceResult, TransportError};
pub use events::{EventBus, ResourceEvent};
pub use lifecycle::{AnyResource, Instance, Lifecycle, ResourceStatus};
pub use mock::{MockCall, MockConnection};
pub use platform::{Platform, PlatformFacts};
pub use resource::Resource;
