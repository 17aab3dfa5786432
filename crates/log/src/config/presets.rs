//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format, Writer};

impl Config {
    /// Create configuration from environment variables.
    ///
    /// `VIGIL_LOG` (then `RUST_LOG`) sets the filter and `VIGIL_LOG_FORMAT`
    /// the format.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("VIGIL_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("VIGIL_LOG_FORMAT") {
            config.format = Format::parse_lossy(&format);
            if config.format == Format::Json {
                config.display.colors = false;
            }
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (captured by the test harness)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            writer: Writer::Test,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
        }
    }
}
