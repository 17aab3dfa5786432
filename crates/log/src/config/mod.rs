//! Logger configuration.

mod presets;

use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human friendly
    Pretty,
    /// Single line per event
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl Format {
    /// Parse a format name, falling back to [`Format::Compact`].
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Where formatted events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Writer {
    #[default]
    Stderr,
    Stdout,
    /// Captured by the test harness.
    Test,
}

/// Event decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub colors: bool,
    pub target: bool,
    /// File and line of the callsite
    pub source: bool,
    pub thread_ids: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            target: true,
            source: false,
            thread_ids: false,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `info,vigil_resource=debug`
    pub level: String,
    pub format: Format,
    pub writer: Writer,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::default(),
            writer: Writer::default(),
            display: DisplayConfig::default(),
        }
    }
}
