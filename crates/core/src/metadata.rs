//! Resource metadata and the declaration builder.
//!
//! A [`ResourceMetadata`] record holds everything a resource author declares
//! about a resource type: documentation, platform support, and the shape of
//! its parameters, properties, matchers and filter criteria. Records are
//! built with [`ResourceMetadata::builder`], whose setters follow
//! *declare-if-present* semantics: an empty argument is ignored, list-valued
//! declarations append in call order.

use serde::{Deserialize, Serialize};

use crate::{ResourceKey, ResourceKeyError, SupportCriterion};

/// Static metadata describing one resource type.
///
/// ```
/// use vigil_core::{Property, ResourceMetadata, SupportCriterion};
///
/// let meta = ResourceMetadata::builder("azure_generic_resource")
///     .desc("Interrogate any resource type in Azure")
///     .supports(SupportCriterion::platform("azure"))
///     .property(Property::new("location").kind("String"))
///     .build()
///     .unwrap();
///
/// assert_eq!(meta.name().as_str(), "azure_generic_resource");
/// assert_eq!(meta.platform_support().len(), 1);
/// assert!(!meta.is_plural());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    name: ResourceKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limitations: Option<String>,
    #[serde(default)]
    related_resources: Vec<RelatedResource>,
    #[serde(default)]
    permissions_required: Vec<RequiredPermission>,
    #[serde(default)]
    platform_support: Vec<SupportCriterion>,
    #[serde(default)]
    resource_params: Vec<ResourceParam>,
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    matchers: Vec<Matcher>,
    #[serde(default)]
    filter_criteria: Vec<FilterCriterion>,
    #[serde(default)]
    plural: bool,
}

impl ResourceMetadata {
    /// Start declaring a resource type. Every other field starts empty.
    pub fn builder(name: impl AsRef<str>) -> ResourceMetadataBuilder {
        ResourceMetadataBuilder {
            name: name.as_ref().to_owned(),
            description: None,
            example: None,
            limitations: None,
            related_resources: Vec::new(),
            permissions_required: Vec::new(),
            platform_support: Vec::new(),
            resource_params: Vec::new(),
            properties: Vec::new(),
            matchers: Vec::new(),
            filter_criteria: Vec::new(),
            plural: false,
        }
    }

    /// The resource name.
    #[inline]
    pub fn name(&self) -> &ResourceKey {
        &self.name
    }

    /// Free-text description.
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Usage example.
    #[inline]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Known limitations.
    #[inline]
    pub fn limitations(&self) -> Option<&str> {
        self.limitations.as_deref()
    }

    /// Related resource types, in declaration order.
    #[inline]
    pub fn related_resources(&self) -> &[RelatedResource] {
        &self.related_resources
    }

    /// Permissions the target credentials need.
    #[inline]
    pub fn permissions_required(&self) -> &[RequiredPermission] {
        &self.permissions_required
    }

    /// Platform-support criteria (any one must match).
    #[inline]
    pub fn platform_support(&self) -> &[SupportCriterion] {
        &self.platform_support
    }

    /// Constructor parameters.
    #[inline]
    pub fn resource_params(&self) -> &[ResourceParam] {
        &self.resource_params
    }

    /// Queryable properties.
    #[inline]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Matchers.
    #[inline]
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Filter criteria of plural resources.
    #[inline]
    pub fn filter_criteria(&self) -> &[FilterCriterion] {
        &self.filter_criteria
    }

    /// Whether the resource type represents a collection.
    #[inline]
    pub fn is_plural(&self) -> bool {
        self.plural
    }
}

/// Arity of a resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// One target object per instance.
    #[default]
    Singular,
    /// A filterable collection of target objects.
    Plural,
}

/// Builder for [`ResourceMetadata`].
///
/// Every setter ignores empty input, so declarations can be written
/// unconditionally from optional sources.
#[derive(Debug, Clone)]
pub struct ResourceMetadataBuilder {
    name: String,
    description: Option<String>,
    example: Option<String>,
    limitations: Option<String>,
    related_resources: Vec<RelatedResource>,
    permissions_required: Vec<RequiredPermission>,
    platform_support: Vec<SupportCriterion>,
    resource_params: Vec<ResourceParam>,
    properties: Vec<Property>,
    matchers: Vec<Matcher>,
    filter_criteria: Vec<FilterCriterion>,
    plural: bool,
}

/// `Some(text)` unless `text` is blank.
fn present(text: impl Into<String>) -> Option<String> {
    let text = text.into();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl ResourceMetadataBuilder {
    /// Set the description.
    pub fn desc(mut self, description: impl Into<String>) -> Self {
        if let Some(description) = present(description) {
            self.description = Some(description);
        }
        self
    }

    /// Set the usage example.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        if let Some(example) = present(example) {
            self.example = Some(example);
        }
        self
    }

    /// Set the known limitations.
    pub fn limitations(mut self, limitations: impl Into<String>) -> Self {
        if let Some(limitations) = present(limitations) {
            self.limitations = Some(limitations);
        }
        self
    }

    /// Append a platform-support criterion. Empty criteria are ignored.
    pub fn supports(mut self, criterion: SupportCriterion) -> Self {
        if !criterion.is_empty() {
            self.platform_support.push(criterion);
        }
        self
    }

    /// Append a related resource.
    pub fn related_resource(mut self, related: RelatedResource) -> Self {
        if !related.name.trim().is_empty() {
            self.related_resources.push(related);
        }
        self
    }

    /// Append a constructor parameter.
    pub fn resource_param(mut self, param: ResourceParam) -> Self {
        if !param.name.trim().is_empty() {
            self.resource_params.push(param);
        }
        self
    }

    /// Append a required permission.
    pub fn required_permission(mut self, permission: RequiredPermission) -> Self {
        if !permission.name.trim().is_empty() {
            self.permissions_required.push(permission);
        }
        self
    }

    /// Append a property.
    pub fn property(mut self, property: Property) -> Self {
        if !property.name.trim().is_empty() {
            self.properties.push(property);
        }
        self
    }

    /// Append a matcher.
    pub fn matcher(mut self, matcher: Matcher) -> Self {
        if !matcher.name.trim().is_empty() {
            self.matchers.push(matcher);
        }
        self
    }

    /// Append a filter criterion.
    pub fn filter_criterion(mut self, criterion: FilterCriterion) -> Self {
        if !criterion.name.trim().is_empty() {
            self.filter_criteria.push(criterion);
        }
        self
    }

    /// Declare the arity. Only [`Arity::Plural`] changes anything.
    pub fn plurality(mut self, arity: Arity) -> Self {
        if arity == Arity::Plural {
            self.plural = true;
        }
        self
    }

    /// Validate the name and build the record.
    pub fn build(self) -> Result<ResourceMetadata, ResourceKeyError> {
        let name: ResourceKey = self.name.parse()?;

        Ok(ResourceMetadata {
            name,
            description: self.description,
            example: self.example,
            limitations: self.limitations,
            related_resources: self.related_resources,
            permissions_required: self.permissions_required,
            platform_support: self.platform_support,
            resource_params: self.resource_params,
            properties: self.properties,
            matchers: self.matchers,
            filter_criteria: self.filter_criteria,
            plural: self.plural,
        })
    }
}

// ── Field descriptors ──────────────────────────────────────────────────────

/// A resource type related to the one being declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResource {
    /// Name of the related resource type.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How the two relate (`parent`, `plural`, `see_also`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl RelatedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }

    pub fn relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = present(relation);
        self
    }
}

/// A permission the target credentials must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPermission {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RequiredPermission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }
}

/// A constructor parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceParam {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether the parameter alone identifies the target object.
    #[serde(default)]
    pub is_identifier: bool,
}

impl ResourceParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = present(kind);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = present(example);
        self
    }

    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }
}

/// A queryable property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// The resource parameter this property identifies, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_for: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = present(kind);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = present(example);
        self
    }

    pub fn identifier_for(mut self, param: impl Into<String>) -> Self {
        self.identifier_for = present(param);
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions_required.extend(present(permission));
        self
    }

    pub fn see_also(mut self, reference: impl Into<String>) -> Self {
        self.see_also.extend(present(reference));
        self
    }
}

/// One argument of a [`Matcher`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherArg {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MatcherArg {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: present(kind),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }
}

/// A matcher (`be_running`, `have_rule`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<MatcherArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
}

impl Matcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: MatcherArg) -> Self {
        if !arg.name.trim().is_empty() {
            self.args.push(arg);
        }
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = present(example);
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions_required.extend(present(permission));
        self
    }

    pub fn see_also(mut self, reference: impl Into<String>) -> Self {
        self.see_also.extend(present(reference));
        self
    }
}

/// A criterion plural resources can be filtered on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
}

impl FilterCriterion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = present(kind);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = present(description);
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = present(example);
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions_required.extend(present(permission));
        self
    }

    pub fn see_also(mut self, reference: impl Into<String>) -> Self {
        self.see_also.extend(present(reference));
        self
    }
}
