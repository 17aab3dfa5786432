//! Shared fixtures for registry integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use vigil_core::{Property, ResourceMetadata, ResourceParam, SupportCriterion};
use vigil_resource::{
    CommandOutput, Connection, Context, Platform, PlatformFacts, Resource, ResourceError,
    ResourceResult, TransportError,
};

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// A real (non-mock) cloud API target that answers `resources.list`.
#[derive(Debug)]
pub struct CloudTarget {
    platform: PlatformFacts,
    resources: Value,
    pub invocations: Arc<AtomicUsize>,
}

impl CloudTarget {
    pub fn new(platform: PlatformFacts, resources: Value) -> Self {
        Self {
            platform,
            resources,
            invocations: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Connection for CloudTarget {
    fn platform(&self) -> &dyn Platform {
        &self.platform
    }

    async fn run_command(&self, command: &str) -> Result<CommandOutput, TransportError> {
        Err(TransportError::not_implemented(format!("command `{command}`")))
    }

    async fn invoke(&self, operation: &str, _request: Value) -> Result<Value, TransportError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match operation {
            "resources.list" => Ok(self.resources.clone()),
            other => Err(TransportError::not_implemented(other)),
        }
    }
}

pub fn aws() -> PlatformFacts {
    PlatformFacts::new("aws", "train-aws: v0.1.15").with_families(["cloud", "api"])
}

pub fn azure() -> PlatformFacts {
    PlatformFacts::new("azure", "train-azure: v0.1.15").with_families(["cloud", "api"])
}

pub fn sample_resources() -> Value {
    json!([
        {"id": "/rg/prod/vm/web01", "name": "web01", "resource_group": "prod"},
        {"id": "/rg/prod/vm/web02", "name": "web02", "resource_group": "prod"},
        {"id": "/rg/dev/vm/web01", "name": "web01", "resource_group": "dev"},
    ])
}

// ---------------------------------------------------------------------------
// azure_generic_resource
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenericParams {
    pub resource_group: Option<String>,
    pub name: Option<String>,
}

/// Lists Azure resources matching a group and/or name.
#[derive(Debug)]
pub struct AzureGenericResource {
    pub ids: Vec<String>,
}

impl AzureGenericResource {
    pub fn exists(&self) -> bool {
        !self.ids.is_empty()
    }
}

impl Resource for AzureGenericResource {
    type Params = GenericParams;

    async fn init(ctx: &Context, params: GenericParams) -> ResourceResult<Self> {
        let listed = ctx.invoke("resources.list", json!({})).await?;
        let Some(items) = listed.as_array() else {
            return Err(ResourceError::fail("resources.list returned a non-array"));
        };

        let matches = |item: &Value, key: &str, want: &Option<String>| {
            want.as_deref()
                .is_none_or(|want| item[key].as_str() == Some(want))
        };
        let ids = items
            .iter()
            .filter(|item| matches(item, "resource_group", &params.resource_group))
            .filter(|item| matches(item, "name", &params.name))
            .filter_map(|item| item["id"].as_str().map(str::to_string))
            .collect();

        Ok(Self { ids })
    }
}

pub fn azure_generic_metadata() -> ResourceMetadata {
    ResourceMetadata::builder("azure_generic_resource")
        .desc("Inspects any Azure resource by group and name.")
        .example(
            "describe azure_generic_resource(resource_group: 'prod', name: 'web01') do\n  it { should exist }\nend",
        )
        .supports(SupportCriterion::platform("azure"))
        .resource_param(ResourceParam::new("resource_group").kind("String"))
        .resource_param(ResourceParam::new("name").kind("String").identifier())
        .property(Property::new("ids").kind("Array"))
        .build()
        .unwrap()
}
