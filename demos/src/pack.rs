//! A small resource pack: one resource per kind of target.

use serde::Deserialize;
use serde_json::{Value, json};
use vigil_core::{
    Matcher, Property, RelatedResource, RequiredPermission, ResourceKeyError, ResourceMetadata,
    ResourceParam, SupportCriterion,
};
use vigil_plugin::ResourceRegistry;
use vigil_resource::{Context, Resource, ResourceError, ResourceResult};

/// Register every resource of the pack.
pub fn register(registry: &ResourceRegistry) -> Result<(), ResourceKeyError> {
    registry.register::<File>(
        ResourceMetadata::builder("file")
            .desc("Tests the existence and permissions of a file.")
            .example("describe file('/etc/hosts') do\n  its('mode') { should cmp '0644' }\nend")
            .supports(SupportCriterion::platform("unix"))
            .resource_param(ResourceParam::new("path").kind("String").identifier())
            .property(Property::new("mode").kind("String"))
            .matcher(Matcher::new("exist"))
            .build()?,
    );

    registry.register::<IisSite>(
        ResourceMetadata::builder("iis_site")
            .desc("Tests the state of an IIS website.")
            .example("describe iis_site('Default Web Site') do\n  it { should be_running }\nend")
            .supports(SupportCriterion::family("windows"))
            .resource_param(ResourceParam::new("name").kind("String").identifier())
            .property(Property::new("state").kind("String"))
            .matcher(Matcher::new("be_running"))
            .build()?,
    );

    registry.register::<AzureGenericResource>(
        ResourceMetadata::builder("azure_generic_resource")
            .desc("Inspects any Azure resource by group and name.")
            .limitations("Only the first page of results is read.")
            .supports(SupportCriterion::platform("azure"))
            .related_resource(RelatedResource::new("azure_generic_resources"))
            .required_permission(RequiredPermission::new("Reader"))
            .resource_param(ResourceParam::new("resource_group").kind("String"))
            .resource_param(ResourceParam::new("name").kind("String"))
            .property(Property::new("ids").kind("Array"))
            .matcher(Matcher::new("exist"))
            .build()?,
    );

    Ok(())
}

/// Stubbed responses for running the pack against the mock harness.
pub fn mock_resources() -> Value {
    json!([
        {"id": "/rg/prod/vm/web01", "name": "web01", "resource_group": "prod"},
        {"id": "/rg/prod/sql/db01", "name": "db01", "resource_group": "prod"},
    ])
}

#[derive(Debug)]
pub struct File {
    pub path: String,
    pub mode: Option<String>,
}

impl Resource for File {
    type Params = String;

    async fn init(ctx: &Context, path: String) -> ResourceResult<Self> {
        let out = ctx.run_command(&format!("stat -c %a {}", sh_quote(&path))).await?;
        let mode = out
            .is_success()
            .then(|| format!("{:0>4}", out.stdout.trim()));
        Ok(Self { path, mode })
    }
}

#[derive(Debug)]
pub struct IisSite {
    pub name: String,
    pub state: String,
}

impl Resource for IisSite {
    type Params = String;

    async fn init(ctx: &Context, name: String) -> ResourceResult<Self> {
        let query = format!("powershell -Command \"(Get-Website -Name {}).State\"", ps_quote(&name));
        let out = ctx.run_command(&query).await?;
        if !out.is_success() {
            return Err(ResourceError::skip("IIS is not installed"));
        }
        let state = out.stdout.trim().to_string();
        if state.is_empty() {
            return Err(ResourceError::fail(format!("no IIS site named {name}")));
        }
        Ok(Self { name, state })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenericParams {
    resource_group: Option<String>,
    name: Option<String>,
}

#[derive(Debug)]
pub struct AzureGenericResource {
    pub ids: Vec<String>,
}

impl Resource for AzureGenericResource {
    type Params = GenericParams;

    async fn init(ctx: &Context, params: GenericParams) -> ResourceResult<Self> {
        let listed = ctx
            .invoke(
                "resources.list",
                json!({ "resource_group": params.resource_group }),
            )
            .await?;
        let items = listed
            .as_array()
            .ok_or_else(|| ResourceError::fail("resources.list returned a non-array"))?;

        let ids = items
            .iter()
            .filter(|item| {
                params
                    .resource_group
                    .as_deref()
                    .is_none_or(|rg| item["resource_group"] == rg)
            })
            .filter(|item| params.name.as_deref().is_none_or(|n| item["name"] == n))
            .filter_map(|item| item["id"].as_str().map(str::to_string))
            .collect();
        Ok(Self { ids })
    }
}

/// Single-quote `arg` for a POSIX shell.
fn sh_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Single-quote `arg` for PowerShell, where a quote is escaped by doubling it.
fn ps_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sh_quote_escapes_single_quotes() {
        assert_eq!(sh_quote("/etc/hosts"), "'/etc/hosts'");
        assert_eq!(sh_quote("/tmp/it's"), r"'/tmp/it'\''s'");
        assert_eq!(sh_quote("'; rm -rf ~"), r"''\''; rm -rf ~'");
    }

    #[test]
    fn ps_quote_doubles_single_quotes() {
        assert_eq!(ps_quote("Default Web Site"), "'Default Web Site'");
        assert_eq!(ps_quote("o'brien"), "'o''brien'");
    }
}
