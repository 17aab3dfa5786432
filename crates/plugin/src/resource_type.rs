//! Type-erased resource descriptors.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use vigil_core::{ResourceKey, ResourceMetadata, SupportCriterion};
use vigil_resource::{
    AnyResource, Context, Instance, Lifecycle, Resource, ResourceError, ResourceResult,
};

type ErasedInit = for<'a> fn(
    &'a Context,
    serde_json::Value,
    &ResourceKey,
) -> BoxFuture<'a, ResourceResult<AnyResource>>;

/// A registered resource type: its metadata plus a constructor that takes
/// JSON arguments.
///
/// Created by [`ResourceRegistry::register`](crate::ResourceRegistry::register).
#[derive(Clone)]
pub struct ResourceType {
    metadata: Arc<ResourceMetadata>,
    type_name: &'static str,
    init: ErasedInit,
}

impl ResourceType {
    /// Describe resource implementation `R` with `metadata`.
    pub fn new<R: Resource>(metadata: ResourceMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata),
            type_name: std::any::type_name::<R>(),
            init: erased_init::<R>,
        }
    }

    /// Name the type is registered under.
    pub fn name(&self) -> &ResourceKey {
        self.metadata.name()
    }

    /// Declared metadata.
    pub fn metadata(&self) -> &Arc<ResourceMetadata> {
        &self.metadata
    }

    /// Short description from the metadata, if any.
    pub fn description(&self) -> Option<&str> {
        self.metadata.description()
    }

    /// Usage example from the metadata, if any.
    pub fn example(&self) -> Option<&str> {
        self.metadata.example()
    }

    /// Whether the resource is a plural (filter table) resource.
    pub fn is_plural(&self) -> bool {
        self.metadata.is_plural()
    }

    /// Rust type name of the implementation, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Construct an instance, gated by `supports`.
    ///
    /// `args` is deserialized into the implementation's parameters only once
    /// init runs, after the platform gate. A deserialization failure is
    /// [`ResourceError::InvalidParams`].
    pub async fn construct(
        &self,
        lifecycle: &Lifecycle,
        ctx: &Context,
        supports: &[SupportCriterion],
        args: serde_json::Value,
    ) -> ResourceResult<Instance<AnyResource>> {
        let init = self.init;
        let name = self.metadata.name();
        lifecycle
            .construct_with(ctx, Arc::clone(&self.metadata), supports, move || {
                init(ctx, args, name)
            })
            .await
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("name", self.name())
            .field("type_name", &self.type_name)
            .field("plural", &self.is_plural())
            .finish()
    }
}

fn erased_init<'a, R: Resource>(
    ctx: &'a Context,
    args: serde_json::Value,
    name: &ResourceKey,
) -> BoxFuture<'a, ResourceResult<AnyResource>> {
    let params = serde_json::from_value::<R::Params>(args).map_err(|err| {
        ResourceError::InvalidParams {
            resource: name.to_string(),
            reason: err.to_string(),
        }
    });

    Box::pin(async move {
        let resource = R::init(ctx, params?).await?;
        Ok(Box::new(resource) as AnyResource)
    })
}
