//! Resource construction and instance state.
//!
//! [`Lifecycle`] wraps a user-authored [`Resource`] into an [`Instance`]:
//!
//! 1. If the resource declares platform-support criteria and the target does
//!    not match them, the instance is skipped and the initializer never runs.
//!    Under a mock connection the instance is still skipped with the same
//!    message, but the initializer runs anyway so the resource gets built.
//! 2. Otherwise the initializer runs. Its skip and fail signals become
//!    instance state; under a mock connection, a "not implemented" transport
//!    error becomes a skip when [`LifecycleConfig::lenient_mock_errors`] is
//!    set. Every other error is returned unchanged.
//! 3. An instance that was neither skipped nor failed is active.
//!
//! Skipped and failed are terminal: the first transition out of active wins
//! and its message never changes afterwards.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;
use vigil_core::{ResourceKey, ResourceMetadata, SupportCriterion};

use crate::config::LifecycleConfig;
use crate::context::Context;
use crate::error::{ResourceError, ResourceResult};
use crate::events::{EventBus, ResourceEvent};
use crate::resource::Resource;
use crate::support;

/// Type-erased resource implementation, as produced by registry lookups.
pub type AnyResource = Box<dyn Any + Send + Sync>;

/// State of a constructed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStatus {
    /// The resource applies and its data can be trusted.
    Active,
    /// The resource does not apply to this target.
    Skipped {
        /// Why it was skipped.
        message: String,
    },
    /// The resource applies but could not be evaluated.
    Failed {
        /// Why it failed.
        message: String,
    },
}

impl ResourceStatus {
    /// Neither skipped nor failed.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether the resource does not apply to the target.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Whether the resource applies but could not be evaluated.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The skip or failure message.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Active => None,
            Self::Skipped { message } | Self::Failed { message } => Some(message),
        }
    }
}

/// A constructed resource: the user implementation plus lifecycle state.
///
/// Callers must check [`is_skipped`](Self::is_skipped) and
/// [`is_failed`](Self::is_failed) before trusting the resource's data.
/// [`resource`](Self::resource) is `None` whenever the initializer did not
/// complete.
///
/// An instance displays as its resource name in every state.
pub struct Instance<R> {
    metadata: Arc<ResourceMetadata>,
    context: Context,
    status: ResourceStatus,
    resource: Option<R>,
}

impl<R> Instance<R> {
    fn new(metadata: Arc<ResourceMetadata>, context: Context) -> Self {
        Self {
            metadata,
            context,
            status: ResourceStatus::Active,
            resource: None,
        }
    }

    /// The resource name.
    pub fn name(&self) -> &ResourceKey {
        self.metadata.name()
    }

    /// Current state.
    pub fn status(&self) -> &ResourceStatus {
        &self.status
    }

    /// Whether the instance was neither skipped nor failed. Only an active
    /// instance's data can be trusted.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the instance was skipped, either by the platform gate or by
    /// its initializer.
    pub fn is_skipped(&self) -> bool {
        self.status.is_skipped()
    }

    /// Whether the initializer reported a failure.
    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }

    /// Message captured when the instance was skipped or failed.
    pub fn exception_message(&self) -> Option<&str> {
        self.status.message()
    }

    /// The user implementation, if its initializer completed.
    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    pub fn resource_mut(&mut self) -> Option<&mut R> {
        self.resource.as_mut()
    }

    pub fn into_resource(self) -> Option<R> {
        self.resource
    }

    /// Declared metadata of the resource type.
    pub fn resource_metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    /// The runtime context the instance was built with.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mark an active instance skipped.
    ///
    /// Returns `false` and changes nothing if it was already skipped or failed.
    pub fn skip_resource(&mut self, message: impl Into<String>) -> bool {
        self.transition(ResourceStatus::Skipped {
            message: message.into(),
        })
    }

    /// Mark an active instance failed.
    ///
    /// Returns `false` and changes nothing if it was already skipped or failed.
    pub fn fail_resource(&mut self, message: impl Into<String>) -> bool {
        self.transition(ResourceStatus::Failed {
            message: message.into(),
        })
    }

    fn transition(&mut self, next: ResourceStatus) -> bool {
        if !self.status.is_active() {
            return false;
        }
        self.status = next;
        true
    }
}

impl Instance<AnyResource> {
    /// Borrow the type-erased implementation as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.resource.as_ref()?.downcast_ref::<T>()
    }

    /// Mutably borrow the type-erased implementation as `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.resource.as_mut()?.downcast_mut::<T>()
    }
}

impl<R> fmt::Display for Instance<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().as_str())
    }
}

impl<R> fmt::Debug for Instance<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", self.name())
            .field("status", &self.status)
            .field("initialized", &self.resource.is_some())
            .finish()
    }
}

/// Builds [`Instance`]s.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    config: LifecycleConfig,
    events: Arc<EventBus>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}

impl Lifecycle {
    /// Create a lifecycle with its own event bus. An out-of-range
    /// `event_buffer` is clamped.
    pub fn new(config: LifecycleConfig) -> Self {
        let config = config.validated();
        let events = Arc::new(EventBus::new(config.event_buffer));
        Self { config, events }
    }

    /// Create a lifecycle that reports to an existing event bus.
    pub fn with_events(config: LifecycleConfig, events: Arc<EventBus>) -> Self {
        Self { config, events }
    }

    /// Behavior switches this lifecycle was built with.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Bus receiving a [`ResourceEvent`] for every constructed instance.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Construct `R` with `params`, gated by the criteria `metadata` declares.
    pub async fn construct_declared<R: Resource>(
        &self,
        ctx: &Context,
        metadata: Arc<ResourceMetadata>,
        params: R::Params,
    ) -> ResourceResult<Instance<R>> {
        let supports = metadata.platform_support().to_vec();
        self.construct::<R>(ctx, metadata, &supports, params).await
    }

    /// Construct `R` with `params`, gated by `supports`.
    ///
    /// `supports` is the only gate consulted; `metadata`'s own criteria are
    /// not re-read. The registry passes its supports index here, which is
    /// built from the metadata at registration. Use
    /// [`construct_declared`](Self::construct_declared) to gate on the
    /// metadata directly.
    pub async fn construct<R: Resource>(
        &self,
        ctx: &Context,
        metadata: Arc<ResourceMetadata>,
        supports: &[SupportCriterion],
        params: R::Params,
    ) -> ResourceResult<Instance<R>> {
        self.construct_with(ctx, metadata, supports, || R::init(ctx, params))
            .await
    }

    /// Construct an instance from an arbitrary initializer.
    ///
    /// `supports` is the gate, as for [`construct`](Self::construct). `init`
    /// is only called once the gate has passed, or under a mock connection,
    /// where a gate miss still skips the instance first.
    pub async fn construct_with<T, I, F>(
        &self,
        ctx: &Context,
        metadata: Arc<ResourceMetadata>,
        supports: &[SupportCriterion],
        init: I,
    ) -> ResourceResult<Instance<T>>
    where
        I: FnOnce() -> F,
        F: Future<Output = ResourceResult<T>>,
    {
        let span = tracing::debug_span!(
            "construct_resource",
            resource = %metadata.name(),
            platform = ctx.platform().name(),
            mock = ctx.is_mock(),
        );

        async move {
            let mut instance = Instance::new(metadata, ctx.clone());
            let mock = ctx.is_mock();

            if !support::is_supported(ctx.platform(), supports) {
                let message = support::unsupported_message(instance.name(), ctx.platform());
                instance.skip_resource(message);
                if !mock {
                    self.report(&instance);
                    return Ok(instance);
                }
                tracing::debug!("mock connection, constructing unsupported resource anyway");
            }

            // Signals from init only apply while the instance is still active.
            match init().await {
                Ok(resource) => instance.resource = Some(resource),
                Err(ResourceError::Skipped(message)) => {
                    instance.skip_resource(message);
                }
                Err(ResourceError::Failed(message)) => {
                    instance.fail_resource(message);
                }
                Err(err) if mock && self.config.lenient_mock_errors && err.is_not_implemented() => {
                    instance.skip_resource(err.to_string());
                }
                Err(err) => {
                    tracing::debug!(error = %err, "resource construction aborted");
                    return Err(err);
                }
            }

            self.report(&instance);
            Ok(instance)
        }
        .instrument(span)
        .await
    }

    fn report<T>(&self, instance: &Instance<T>) {
        let name = instance.name().to_string();
        let event = match &instance.status {
            ResourceStatus::Active => {
                tracing::debug!("resource constructed");
                ResourceEvent::Constructed { name }
            }
            ResourceStatus::Skipped { message } => {
                tracing::info!(%message, "resource skipped");
                ResourceEvent::Skipped {
                    name,
                    message: message.clone(),
                }
            }
            ResourceStatus::Failed { message } => {
                tracing::info!(%message, "resource failed");
                ResourceEvent::Failed {
                    name,
                    message: message.clone(),
                }
            }
        };
        self.events.emit(event);
    }
}
