//! Resource type registry.
//!
//! Resource packs populate a [`ResourceRegistry`] while loading, then
//! [`freeze`](ResourceRegistry::freeze) it into a [`FrozenRegistry`] that the
//! evaluation phase shares across tasks.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use vigil_core::{ResourceKey, ResourceMetadata, SupportCriterion};
use vigil_resource::{
    AnyResource, Context, EventBus, Instance, Lifecycle, LifecycleConfig, Resource,
    ResourceEvent,
};

use crate::{PluginError, PluginResult};
use crate::resource_type::ResourceType;

#[derive(Debug, Clone)]
struct Entry {
    resource_type: Arc<ResourceType>,
    supports: Arc<[SupportCriterion]>,
}

impl Entry {
    fn new(resource_type: ResourceType) -> Self {
        let supports = resource_type.metadata().platform_support().into();
        Self {
            resource_type: Arc::new(resource_type),
            supports,
        }
    }

    async fn construct(
        &self,
        lifecycle: &Lifecycle,
        ctx: &Context,
        args: serde_json::Value,
    ) -> PluginResult<Instance<AnyResource>> {
        Ok(self
            .resource_type
            .construct(lifecycle, ctx, &self.supports, args)
            .await?)
    }
}

/// Registry of resource types, filled while resource packs load.
///
/// Registration takes `&self` and may run from several threads. A name
/// registered twice keeps the last registration.
///
/// ```
/// use vigil_core::ResourceMetadata;
/// use vigil_plugin::ResourceRegistry;
/// use vigil_resource::{Context, Resource, ResourceResult};
///
/// struct Hostname;
///
/// impl Resource for Hostname {
///     type Params = ();
///
///     async fn init(_ctx: &Context, _params: ()) -> ResourceResult<Self> {
///         Ok(Self)
///     }
/// }
///
/// let registry = ResourceRegistry::new();
/// let meta = ResourceMetadata::builder("hostname").build().unwrap();
/// registry.register::<Hostname>(meta);
///
/// assert!(registry.contains("hostname"));
/// ```
pub struct ResourceRegistry {
    entries: DashMap<ResourceKey, Entry>,
    lifecycle: Lifecycle,
}

impl ResourceRegistry {
    /// Create an empty registry with the default lifecycle configuration.
    pub fn new() -> Self {
        Self::with_lifecycle(Lifecycle::default())
    }

    /// Create an empty registry whose lifecycle uses `config`.
    pub fn with_config(config: LifecycleConfig) -> Self {
        Self::with_lifecycle(Lifecycle::new(config))
    }

    /// Create an empty registry that constructs instances through `lifecycle`.
    pub fn with_lifecycle(lifecycle: Lifecycle) -> Self {
        Self {
            entries: DashMap::new(),
            lifecycle,
        }
    }

    /// Register implementation `R` under `metadata`'s name.
    pub fn register<R: Resource>(&self, metadata: ResourceMetadata) -> Arc<ResourceType> {
        self.register_type(ResourceType::new::<R>(metadata))
    }

    /// Register a prepared descriptor, replacing any earlier one with the
    /// same name. The supports index entry is replaced with it.
    pub fn register_type(&self, resource_type: ResourceType) -> Arc<ResourceType> {
        let entry = Entry::new(resource_type);
        let registered = Arc::clone(&entry.resource_type);
        let key = registered.name().clone();
        let name = key.to_string();

        let event = match self.entries.insert(key, entry) {
            Some(_) => {
                tracing::warn!(
                    resource = %name,
                    "Overwriting resource {name}. The last registration of {name} wins"
                );
                ResourceEvent::Overwritten { name }
            }
            None => {
                tracing::debug!(resource = %name, type_name = registered.type_name(), "registered resource");
                ResourceEvent::Registered { name }
            }
        };
        self.lifecycle.events().emit(event);

        registered
    }

    /// Look up a resource type by its exact name. An invalid name finds
    /// nothing.
    pub fn lookup(&self, name: &str) -> Option<Arc<ResourceType>> {
        let key = ResourceKey::new(name).ok()?;
        self.entries
            .get(&key)
            .map(|entry| Arc::clone(&entry.resource_type))
    }

    /// Platform-support criteria declared for `name`; empty when none were.
    pub fn supports_for(&self, name: &str) -> Arc<[SupportCriterion]> {
        ResourceKey::new(name)
            .ok()
            .and_then(|key| self.entries.get(&key).map(|e| Arc::clone(&e.supports)))
            .unwrap_or_else(|| Arc::from([]))
    }

    /// Construct an instance of resource `name` from JSON `args`.
    pub async fn construct(
        &self,
        ctx: &Context,
        name: &str,
        args: serde_json::Value,
    ) -> PluginResult<Instance<AnyResource>> {
        let key = ResourceKey::new(name)?;
        // Clone out of the map so no shard lock is held across the await.
        let entry = self
            .entries
            .get(&key)
            .map(|e| e.value().clone())
            .ok_or_else(|| PluginError::NotFound(name.to_string()))?;
        entry.construct(&self.lifecycle, ctx, args).await
    }

    /// Whether a resource type is registered under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        ResourceKey::new(name).is_ok_and(|key| self.entries.contains_key(&key))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<ResourceKey> {
        let mut names: Vec<_> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered resource types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bus receiving registration and lifecycle events.
    pub fn events(&self) -> &Arc<EventBus> {
        self.lifecycle.events()
    }

    /// The lifecycle used by [`construct`](Self::construct).
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// End the loading phase.
    pub fn freeze(self) -> FrozenRegistry {
        let entries: HashMap<_, _> = self.entries.into_iter().collect();
        tracing::debug!(count = entries.len(), "resource registry frozen");
        FrozenRegistry {
            entries: Arc::new(entries),
            lifecycle: self.lifecycle,
        }
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("count", &self.entries.len())
            .field("names", &self.names())
            .finish()
    }
}

/// Read-only registry for the evaluation phase. Cheap to clone.
#[derive(Clone)]
pub struct FrozenRegistry {
    entries: Arc<HashMap<ResourceKey, Entry>>,
    lifecycle: Lifecycle,
}

impl FrozenRegistry {
    fn entry(&self, name: &str) -> Option<&Entry> {
        let key = ResourceKey::new(name).ok()?;
        self.entries.get(&key)
    }

    /// Look up a resource type by its exact name. An invalid name finds
    /// nothing.
    pub fn lookup(&self, name: &str) -> Option<Arc<ResourceType>> {
        self.entry(name).map(|e| Arc::clone(&e.resource_type))
    }

    /// Platform-support criteria declared for `name`; empty when none were.
    pub fn supports_for(&self, name: &str) -> Arc<[SupportCriterion]> {
        self.entry(name)
            .map(|e| Arc::clone(&e.supports))
            .unwrap_or_else(|| Arc::from([]))
    }

    /// Construct an instance of resource `name` from JSON `args`.
    pub async fn construct(
        &self,
        ctx: &Context,
        name: &str,
        args: serde_json::Value,
    ) -> PluginResult<Instance<AnyResource>> {
        let key = ResourceKey::new(name)?;
        let entry = self
            .entries
            .get(&key)
            .ok_or_else(|| PluginError::NotFound(name.to_string()))?;
        entry.construct(&self.lifecycle, ctx, args).await
    }

    /// Whether a resource type is registered under exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&ResourceKey> {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        names
    }

    /// Metadata of every registered type, sorted by name.
    pub fn metadata(&self) -> Vec<&ResourceMetadata> {
        let mut all: Vec<_> = self
            .entries
            .values()
            .map(|e| e.resource_type.metadata().as_ref())
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Number of registered resource types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry was frozen empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bus receiving lifecycle events for constructed instances.
    pub fn events(&self) -> &Arc<EventBus> {
        self.lifecycle.events()
    }
}

impl std::fmt::Debug for FrozenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrozenRegistry")
            .field("count", &self.entries.len())
            .field("names", &self.names())
            .finish()
    }
}
