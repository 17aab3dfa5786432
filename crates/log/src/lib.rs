//! # Vigil Log
//!
//! Logging setup shared by Vigil binaries and test suites. Everything in the
//! workspace logs through [`tracing`]; this crate installs the subscriber.
//!
//! ```no_run
//! let _guard = vigil_log::init().expect("logger");
//! tracing::info!("ready");
//! ```

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Writer};
pub use error::{LogError, LogResult};

/// Install the logger configured from the environment.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(Config::from_env()).build()
}

/// Install the logger with an explicit configuration.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Install a test-harness logger. Safe to call from every test; only the
/// first call in a process installs anything.
pub fn init_test() {
    let _ = LoggerBuilder::from_config(Config::test()).build();
}
