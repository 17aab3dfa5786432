//! Platform-support evaluation.

use vigil_core::{ResourceKey, SupportCriterion};

use crate::platform::Platform;

/// Whether a resource with `criteria` applies to `platform`.
///
/// A resource that declares no criteria applies everywhere, and the platform
/// is not consulted.
pub fn is_supported(platform: &dyn Platform, criteria: &[SupportCriterion]) -> bool {
    criteria.is_empty() || platform.supported(criteria)
}

/// Skip message for a resource that does not apply to `platform`.
pub fn unsupported_message(name: &ResourceKey, platform: &dyn Platform) -> String {
    format!(
        "Resource {} is not supported on platform {}/{} (family {}).",
        name.capitalized(),
        platform.name(),
        platform.release(),
        platform.family(),
    )
}
