//! End-to-end tests for a cloud resource registered through the registry.
//!
//! `azure_generic_resource` declares `supports platform: azure`; on other
//! cloud targets it must be skipped without touching the API.

mod common;

use std::sync::atomic::Ordering;

use common::{AzureGenericResource, CloudTarget, aws, azure, azure_generic_metadata, sample_resources};
use pretty_assertions::assert_eq;
use serde_json::json;
use vigil_plugin::{FrozenRegistry, PluginError, ResourceRegistry};
use vigil_resource::{
    Context, LifecycleConfig, MockConnection, ResourceError, ResourceEvent, ResourceStatus,
};

fn registry() -> FrozenRegistry {
    vigil_log::init_test();
    let registry = ResourceRegistry::new();
    registry.register::<AzureGenericResource>(azure_generic_metadata());
    registry.freeze()
}

#[tokio::test]
async fn skipped_on_aws_without_calling_the_api() {
    let registry = registry();
    let mut events = registry.events().subscribe();
    let target = CloudTarget::new(aws(), sample_resources());
    let invocations = target.invocations.clone();
    let ctx = Context::from_connection(target);

    let inst = registry
        .construct(&ctx, "azure_generic_resource", json!({"name": "web01"}))
        .await
        .unwrap();

    assert!(inst.is_skipped());
    let message = inst.exception_message().unwrap();
    assert!(message.contains("Azure_generic_resource"), "{message}");
    assert!(message.contains("not supported on platform aws"), "{message}");
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert!(inst.downcast_ref::<AzureGenericResource>().is_none());

    assert_eq!(
        events.try_recv().unwrap(),
        ResourceEvent::Skipped {
            name: "azure_generic_resource".into(),
            message: message.to_string(),
        }
    );
}

#[tokio::test]
async fn active_on_azure() {
    let registry = registry();
    let ctx = Context::from_connection(CloudTarget::new(azure(), sample_resources()));

    let inst = registry
        .construct(
            &ctx,
            "azure_generic_resource",
            json!({"resource_group": "prod", "name": "web01"}),
        )
        .await
        .unwrap();

    assert!(inst.is_active());
    assert_eq!(inst.exception_message(), None);
    assert_eq!(inst.to_string(), "azure_generic_resource");

    let resource = inst.downcast_ref::<AzureGenericResource>().unwrap();
    assert!(resource.exists());
    assert_eq!(resource.ids, ["/rg/prod/vm/web01"]);
}

#[tokio::test]
async fn unexpected_api_shape_fails_the_instance() {
    let registry = registry();
    let ctx = Context::from_connection(CloudTarget::new(azure(), json!({"error": "throttled"})));

    let inst = registry
        .construct(&ctx, "azure_generic_resource", json!({}))
        .await
        .unwrap();

    assert_eq!(
        inst.status(),
        &ResourceStatus::Failed {
            message: "resources.list returned a non-array".into()
        }
    );
}

#[tokio::test]
async fn mock_harness_builds_unsupported_resource_as_skipped() {
    let registry = registry();
    let conn = MockConnection::new(aws()).with_operation("resources.list", sample_resources());
    let ctx = Context::from_connection(conn);

    let inst = registry
        .construct(&ctx, "azure_generic_resource", json!({"resource_group": "dev"}))
        .await
        .unwrap();

    assert!(inst.is_skipped());
    assert!(inst.exception_message().unwrap().contains("is not supported"));
    assert_eq!(
        inst.downcast_ref::<AzureGenericResource>().unwrap().ids,
        ["/rg/dev/vm/web01"]
    );
}

#[tokio::test]
async fn unstubbed_mock_api_is_skipped() {
    let registry = registry();
    let ctx = Context::from_connection(MockConnection::new(azure()));

    let inst = registry
        .construct(&ctx, "azure_generic_resource", json!({}))
        .await
        .unwrap();

    assert!(inst.is_skipped());
    assert!(inst.exception_message().unwrap().contains("resources.list"));
}

#[tokio::test]
async fn strict_registry_propagates_unstubbed_mock_api() {
    let registry = ResourceRegistry::with_config(LifecycleConfig::strict());
    registry.register::<AzureGenericResource>(azure_generic_metadata());
    let ctx = Context::from_connection(MockConnection::new(azure()));

    let err = registry
        .construct(&ctx, "azure_generic_resource", json!({}))
        .await
        .unwrap_err();

    assert!(err.as_construction().unwrap().is_not_implemented());
}

#[tokio::test]
async fn invalid_args_are_fatal_once_supported() {
    let registry = registry();
    let ctx = Context::from_connection(CloudTarget::new(azure(), sample_resources()));

    let err = registry
        .construct(&ctx, "azure_generic_resource", json!({"subscription": "x"}))
        .await
        .unwrap_err();

    match err {
        PluginError::Construction(ResourceError::InvalidParams { resource, reason }) => {
            assert_eq!(resource, "azure_generic_resource");
            assert!(reason.contains("subscription"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_args_on_unsupported_platform_are_skipped() {
    let registry = registry();
    let ctx = Context::from_connection(CloudTarget::new(aws(), sample_resources()));

    let inst = registry
        .construct(&ctx, "azure_generic_resource", json!({"subscription": "x"}))
        .await
        .unwrap();

    assert!(inst.is_skipped());
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let registry = registry();
    let ctx = Context::from_connection(CloudTarget::new(azure(), sample_resources()));

    let err = registry
        .construct(&ctx, "azure_virtual_machine", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, PluginError::NotFound(name) if name == "azure_virtual_machine"));
}

#[test]
fn metadata_is_available_for_docs() {
    let registry = registry();
    let docs = registry.metadata();

    assert_eq!(docs.len(), 1);
    let meta = docs[0];
    assert_eq!(meta.description(), Some("Inspects any Azure resource by group and name."));
    assert_eq!(meta.resource_params().len(), 2);
    assert!(meta.resource_params()[1].is_identifier);
    assert_eq!(
        registry.supports_for("azure_generic_resource").as_ref(),
        meta.platform_support()
    );
}
