//! Runs a small resource pack against the local machine or the mock harness
//! and prints what each resource ended up as.

mod local;
mod pack;

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use serde_json::json;
use vigil_log::{Config, Format};
use vigil_plugin::{FrozenRegistry, ResourceRegistry};
use vigil_resource::{
    Connection, Context, LifecycleConfig, MockConnection, PlatformFacts, ResourceEvent,
};

use crate::local::LocalConnection;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MockPlatform {
    Linux,
    Windows,
    Azure,
    Aws,
}

impl MockPlatform {
    fn facts(self) -> PlatformFacts {
        match self {
            Self::Linux => PlatformFacts::new("ubuntu", "22.04")
                .with_families(["debian", "linux", "unix", "os"]),
            Self::Windows => PlatformFacts::new("windows_server_2019", "10.0.17763")
                .with_families(["windows", "os"]),
            Self::Azure => PlatformFacts::new("azure", "train-azure: v0.1.15")
                .with_families(["cloud", "api"]),
            Self::Aws => {
                PlatformFacts::new("aws", "train-aws: v0.1.15").with_families(["cloud", "api"])
            }
        }
    }
}

/// Vigil resource pack demo
#[derive(Debug, Parser)]
#[command(name = "vigil-demo", version)]
struct Cli {
    /// Use the mock harness with this platform instead of the local machine
    #[arg(long, value_enum)]
    mock: Option<MockPlatform>,

    /// Print resource documentation as JSON and exit
    #[arg(long)]
    docs: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs
    #[arg(long, env = "VIGIL_DEMO_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = Config::from_env();
    if cli.json_logs {
        log_config.format = Format::Json;
        log_config.display.colors = false;
    }
    let logger = vigil_log::init_with(log_config).context("failed to install logger")?;
    if cli.verbose {
        logger.set_level("debug")?;
    }

    let registry = ResourceRegistry::with_config(LifecycleConfig::from_env());
    pack::register(&registry).context("invalid resource declaration")?;
    let registry = registry.freeze();

    if cli.docs {
        let docs = serde_json::to_string_pretty(&registry.metadata())?;
        println!("{docs}");
        return Ok(());
    }

    let connection: Arc<dyn Connection> = match cli.mock {
        Some(platform) => Arc::new(
            MockConnection::new(platform.facts())
                .with_operation("resources.list", pack::mock_resources()),
        ),
        None => Arc::new(LocalConnection::detect().await),
    };
    let ctx = Context::new(connection);

    run(&registry, &ctx).await
}

async fn run(registry: &FrozenRegistry, ctx: &Context) -> anyhow::Result<()> {
    let mut events = registry.events().subscribe();
    let platform = ctx.platform();
    println!(
        "target: {}/{} (family {}){}",
        platform.name(),
        platform.release(),
        platform.family(),
        if ctx.is_mock() { " [mock]" } else { "" }
    );

    let checks = [
        ("file", json!("/etc/hosts")),
        ("iis_site", json!("Default Web Site")),
        ("azure_generic_resource", json!({"resource_group": "prod"})),
    ];

    for (name, args) in checks {
        let instance = registry
            .construct(ctx, name, args)
            .await
            .with_context(|| format!("constructing {name}"))?;

        let detail = if let Some(file) = instance.downcast_ref::<pack::File>() {
            format!("{} mode {}", file.path, file.mode.as_deref().unwrap_or("missing"))
        } else if let Some(site) = instance.downcast_ref::<pack::IisSite>() {
            format!("{} is {}", site.name, site.state)
        } else if let Some(generic) = instance.downcast_ref::<pack::AzureGenericResource>() {
            format!("{} matching resources", generic.ids.len())
        } else {
            instance.exception_message().unwrap_or_default().to_string()
        };

        let state = if instance.is_skipped() {
            "skipped"
        } else if instance.is_failed() {
            "failed"
        } else {
            "active"
        };
        println!("  {:<24} {state:<8} {detail}", instance.to_string());
    }

    let mut skipped = 0;
    while let Ok(event) = events.try_recv() {
        if matches!(event, ResourceEvent::Skipped { .. }) {
            skipped += 1;
        }
    }
    tracing::info!(skipped, "run complete");
    Ok(())
}
