//! Logger builder implementation

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, TestWriter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::config::{Config, Format, Writer};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Handle to the installed logger.
///
/// Keeps the filter reloadable for as long as it lives.
pub struct LoggerGuard {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl std::fmt::Debug for LoggerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerGuard").finish_non_exhaustive()
    }
}

macro_rules! fmt_layer {
    ($layer:expr, $display:expr, $writer:expr) => {
        $layer
            .with_ansi($display.colors)
            .with_target($display.target)
            .with_file($display.source)
            .with_line_number($display.source)
            .with_thread_ids($display.thread_ids)
            .with_writer($writer)
    };
}

fn parse_filter(level: &str) -> LogResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| LogError::Filter(format!("{level}: {e}")))
}

fn make_writer(writer: Writer) -> BoxMakeWriter {
    match writer {
        Writer::Stderr => BoxMakeWriter::new(std::io::stderr),
        Writer::Stdout => BoxMakeWriter::new(std::io::stdout),
        Writer::Test => BoxMakeWriter::new(TestWriter::default()),
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global logger.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] if the level string cannot be parsed and
    /// [`LogError::Init`] if a global subscriber is already installed.
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = parse_filter(&self.config.level)?;
        let (filter_layer, handle) = reload::Layer::new(filter);
        let registry = Registry::default().with(filter_layer);

        let display = &self.config.display;
        let writer = make_writer(self.config.writer);
        let installed = match self.config.format {
            Format::Pretty => registry
                .with(fmt_layer!(fmt::layer().pretty(), display, writer))
                .try_init(),
            Format::Compact => registry
                .with(fmt_layer!(fmt::layer().compact(), display, writer))
                .try_init(),
            Format::Json => registry
                .with(fmt_layer!(fmt::layer().json(), display, writer))
                .try_init(),
        };
        installed.map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = ?self.config.format,
            "logger initialized"
        );
        Ok(LoggerGuard { filter: handle })
    }
}

impl LoggerGuard {
    /// Replace the active filter, e.g. to raise verbosity mid-run.
    pub fn set_level(&self, level: &str) -> LogResult<()> {
        let filter = parse_filter(level)?;
        self.filter
            .reload(filter)
            .map_err(|e| LogError::Reload(e.to_string()))
    }
}
