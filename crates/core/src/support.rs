//! Platform-support criteria.

use serde::{Deserialize, Serialize};

/// One platform-matching predicate.
///
/// A criterion matches a target when **every** key it sets matches. A list of
/// criteria matches when **any** criterion matches. Unset keys are not
/// checked.
///
/// ```
/// use vigil_core::SupportCriterion;
///
/// let ubuntu_18 = SupportCriterion::platform("ubuntu").with_release("18.*");
/// assert_eq!(ubuntu_18.platform.as_deref(), Some("ubuntu"));
/// assert!(!ubuntu_18.is_empty());
/// assert!(SupportCriterion::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportCriterion {
    /// Platform name or any family in the platform's family hierarchy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// A family in the platform's family hierarchy (`windows`, `debian`, `unix`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_family: Option<String>,
    /// The exact platform name (`ubuntu`, `aws`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    /// The release, exact or with `*` wildcards (`10.*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

impl SupportCriterion {
    /// Criterion on the platform name or family.
    pub fn platform(value: impl Into<String>) -> Self {
        Self::default().with_platform(value)
    }

    /// Criterion on a platform family.
    pub fn family(value: impl Into<String>) -> Self {
        Self::default().with_family(value)
    }

    /// Criterion on the exact platform name.
    pub fn name(value: impl Into<String>) -> Self {
        Self::default().with_name(value)
    }

    /// Also require the platform name or family.
    pub fn with_platform(mut self, value: impl Into<String>) -> Self {
        self.platform = Some(value.into());
        self
    }

    /// Also require a platform family.
    pub fn with_family(mut self, value: impl Into<String>) -> Self {
        self.platform_family = Some(value.into());
        self
    }

    /// Also require the exact platform name.
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.platform_name = Some(value.into());
        self
    }

    /// Also require a release.
    pub fn with_release(mut self, value: impl Into<String>) -> Self {
        self.release = Some(value.into());
        self
    }

    /// Whether no key is set.
    pub fn is_empty(&self) -> bool {
        self.platform.is_none()
            && self.platform_family.is_none()
            && self.platform_name.is_none()
            && self.release.is_none()
    }
}
