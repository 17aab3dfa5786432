//! Lifecycle configuration

use serde::{Deserialize, Serialize};

/// Largest accepted [`LifecycleConfig::event_buffer`].
pub const MAX_EVENT_BUFFER: usize = 65_536;

/// Configuration for resource construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Under a mock connection, turn "operation not available" transport
    /// errors raised by an initializer into a skip instead of an error.
    ///
    /// Mock harnesses rarely implement every operation a resource calls, so
    /// this keeps mock-driven checks runnable. It can also hide genuine bugs
    /// in mock-based tests.
    pub lenient_mock_errors: bool,
    /// Capacity of the lifecycle event channel, `1..=`[`MAX_EVENT_BUFFER`]
    pub event_buffer: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            lenient_mock_errors: true,
            event_buffer: 1024,
        }
    }
}

impl LifecycleConfig {
    /// Create configuration from environment variables
    ///
    /// Reads `VIGIL_LENIENT_MOCK_ERRORS` (`true`/`false`, `1`/`0`) and
    /// `VIGIL_EVENT_BUFFER`. Unparseable or out-of-range values keep the
    /// default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup("VIGIL_LENIENT_MOCK_ERRORS") {
            match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => config.lenient_mock_errors = true,
                "false" | "0" | "no" => config.lenient_mock_errors = false,
                other => tracing::warn!(value = other, "ignoring invalid VIGIL_LENIENT_MOCK_ERRORS"),
            }
        }

        if let Some(value) = lookup("VIGIL_EVENT_BUFFER") {
            match value.trim().parse::<usize>() {
                Ok(size) if (1..=MAX_EVENT_BUFFER).contains(&size) => config.event_buffer = size,
                _ => tracing::warn!(value = %value, "ignoring invalid VIGIL_EVENT_BUFFER"),
            }
        }

        config
    }

    /// Clamp `event_buffer` into `1..=`[`MAX_EVENT_BUFFER`].
    #[must_use]
    pub fn validated(mut self) -> Self {
        let clamped = self.event_buffer.clamp(1, MAX_EVENT_BUFFER);
        if clamped != self.event_buffer {
            tracing::warn!(
                requested = self.event_buffer,
                used = clamped,
                "event_buffer out of range, clamping"
            );
            self.event_buffer = clamped;
        }
        self
    }

    /// Strict configuration: mock harness errors propagate like real ones
    #[must_use]
    pub fn strict() -> Self {
        Self {
            lenient_mock_errors: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_lenient() {
        let config = LifecycleConfig::default();
        assert!(config.lenient_mock_errors);
        assert_eq!(config.event_buffer, 1024);
        assert!(!LifecycleConfig::strict().lenient_mock_errors);
    }

    #[test]
    fn reads_overrides() {
        let config = LifecycleConfig::from_lookup(lookup(&[
            ("VIGIL_LENIENT_MOCK_ERRORS", "false"),
            ("VIGIL_EVENT_BUFFER", "64"),
        ]));
        assert!(!config.lenient_mock_errors);
        assert_eq!(config.event_buffer, 64);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = LifecycleConfig::from_lookup(lookup(&[
            ("VIGIL_LENIENT_MOCK_ERRORS", "maybe"),
            ("VIGIL_EVENT_BUFFER", "0"),
        ]));
        assert_eq!(config, LifecycleConfig::default());
    }

    #[test]
    fn oversized_event_buffer_keeps_default() {
        let huge = usize::MAX.to_string();
        let config = LifecycleConfig::from_lookup(lookup(&[("VIGIL_EVENT_BUFFER", huge.as_str())]));
        assert_eq!(config.event_buffer, 1024);

        let config = LifecycleConfig::from_lookup(lookup(&[("VIGIL_EVENT_BUFFER", "65537")]));
        assert_eq!(config.event_buffer, 1024);

        let config = LifecycleConfig::from_lookup(lookup(&[("VIGIL_EVENT_BUFFER", "65536")]));
        assert_eq!(config.event_buffer, MAX_EVENT_BUFFER);
    }

    #[test]
    fn validated_clamps_event_buffer() {
        let config = LifecycleConfig {
            event_buffer: usize::MAX,
            ..LifecycleConfig::default()
        };
        assert_eq!(config.validated().event_buffer, MAX_EVENT_BUFFER);

        let config = LifecycleConfig {
            event_buffer: 0,
            ..LifecycleConfig::default()
        };
        assert_eq!(config.validated().event_buffer, 1);

        assert_eq!(LifecycleConfig::default().validated(), LifecycleConfig::default());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: LifecycleConfig =
            serde_json::from_str(r#"{"lenient_mock_errors": false}"#).unwrap();
        assert!(!config.lenient_mock_errors);
        assert_eq!(config.event_buffer, 1024);
    }
}
