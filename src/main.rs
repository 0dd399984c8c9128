//! console-mirror
//!
//! Keeps a typed mirror of a mixing console's parameters over OSC, and
//! lists the addresses and variables each console model exposes.

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use console_mirror::config::{AppConfig, ConfigWatcher};
use console_mirror::model::{self, ModelId, ModelSpec};
use console_mirror::state::{StateTree, TreeActor, TreeHandle, TreeSnapshot};
use console_mirror::transport::Session;
use console_mirror::variables;

/// Console Mirror - typed OSC state mirror for digital mixing consoles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Console model, overrides the config file (full, compact, rack)
    #[arg(short, long)]
    model: Option<String>,

    /// List known console models
    #[arg(long)]
    list_models: bool,

    /// Print every address the model allocates
    #[arg(long)]
    dump_addresses: bool,

    /// Print the UI variables of the model
    #[arg(long)]
    variables: bool,

    /// Print the device subscriptions of the model
    #[arg(long)]
    subscriptions: bool,
}

impl Args {
    fn is_listing(&self) -> bool {
        self.list_models || self.dump_addresses || self.variables || self.subscriptions
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting console-mirror...");

    if args.list_models {
        list_models();
        return Ok(());
    }

    if args.is_listing() {
        let spec = listing_model(&args).await?;
        if args.dump_addresses {
            dump_addresses(spec);
        }
        if args.variables {
            print_variables(spec);
        }
        if args.subscriptions {
            print_subscriptions(spec);
        }
        return Ok(());
    }

    info!("Configuration file: {}", args.config);
    let (config_watcher, initial_config) = ConfigWatcher::new(args.config.clone()).await?;
    info!("Configuration loaded successfully with hot-reload enabled");

    let mut config = (*initial_config).clone();
    if args.model.is_some() {
        config.model = args.model.clone();
    }

    run_app(config, config_watcher, shutdown_signal()).await?;

    info!("console-mirror shutdown complete");
    Ok(())
}

/// Model for listing commands: `--model`, else the config file, else the default
async fn listing_model(args: &Args) -> Result<&'static ModelSpec> {
    if let Some(id) = &args.model {
        return Ok(model::lookup(Some(id.as_str()))?);
    }
    match AppConfig::load(&args.config).await {
        Ok(config) => Ok(config.model_spec()?),
        Err(e) => {
            debug!("No usable config ({:#}), using default model", e);
            Ok(model::lookup(None)?)
        }
    }
}

async fn run_app(
    config: AppConfig,
    mut config_watcher: ConfigWatcher,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<()> {
    let mut spec = config.model_spec()?;
    info!("Console model: {}", spec.name);

    let tree = TreeActor::spawn(StateTree::new(spec));

    if let Some(path) = config.snapshot_path() {
        restore_snapshot(&tree, spec, path).await;
    }

    let mut session =
        Session::connect(&config.device_addr(), config.device.local_port, tree.clone()).await?;

    let mut subscriptions = variables::subscriptions(spec);
    let queried = session.query_all(&subscriptions).await?;
    info!("Queried {} addresses on {}", queried, session.device());

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            received = session.recv() => {
                match received {
                    Ok(count) if count > 0 => debug!("Applied {} feedback reports", count),
                    Ok(_) => {}
                    Err(e) => warn!("Receive failed: {:#}", e),
                }
            }

            Some(new_config) = config_watcher.next_config() => {
                info!("Configuration file changed, reloading...");
                let pending = config.restart_required(&new_config);
                if !pending.is_empty() {
                    warn!(
                        "Changes to {} take effect after a restart",
                        pending.join(", ")
                    );
                }
                match new_config.model_spec() {
                    Ok(new_spec) if new_spec.id != spec.id => {
                        spec = new_spec;
                        tree.rebind(spec);
                        subscriptions = variables::subscriptions(spec);
                        match session.query_all(&subscriptions).await {
                            Ok(n) => info!("Rebound to {} and queried {} addresses", spec.name, n),
                            Err(e) => warn!("Failed to query after model change: {:#}", e),
                        }
                    }
                    Ok(_) => debug!("Console model unchanged"),
                    Err(e) => warn!("Failed to apply config (keeping old model): {}", e),
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping event loop");
                break;
            }
        }
    }

    info!("Shutting down...");
    if let Some(path) = config.snapshot_path() {
        match TreeSnapshot::from_handle(&tree).await {
            Ok(snapshot) => {
                if let Err(e) = snapshot.save_to_file(path).await {
                    warn!("Failed to save state snapshot: {:#}", e);
                } else {
                    info!("Saved {} values to {}", snapshot.values.len(), path);
                }
            }
            Err(e) => warn!("Failed to take state snapshot: {:#}", e),
        }
    }
    tree.shutdown();

    Ok(())
}

async fn restore_snapshot(tree: &TreeHandle, spec: &'static ModelSpec, path: &str) {
    if !std::path::Path::new(path).exists() {
        debug!("No state snapshot at {}", path);
        return;
    }
    match TreeSnapshot::load_from_file(path).await {
        Ok(snapshot) => match snapshot.load_into_handle(tree, spec) {
            Ok(()) => info!("Restored {} values from {}", snapshot.values.len(), path),
            Err(e) => warn!("Ignoring state snapshot: {:#}", e),
        },
        Err(e) => warn!("Failed to load state snapshot: {:#}", e),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn list_models() {
    println!("\n{}", "=== Console Models ===".bold().cyan());
    for id in ModelId::all() {
        let spec = id.spec();
        let tree = StateTree::new(spec);
        let default = if *id == ModelId::default() {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("\n  {}{}", spec.name.bold(), default);
        println!("    id: {}", id.as_str().yellow());
        println!(
            "    channels {} / aux {} / bus {} / matrix {} / main {}",
            spec.channels, spec.auxes, spec.busses, spec.matrices, spec.mains
        );
        println!("    dca {} / mute groups {}", spec.dcas, spec.mute_groups);
        println!(
            "    local aux I/O: {}   gpio: {}",
            optional(spec.local_aux_inputs),
            optional(spec.gpio)
        );
        println!("    leaves: {}", tree.len().to_string().green());
    }
    println!();
}

fn optional(count: Option<u32>) -> ColoredString {
    match count {
        Some(n) => n.to_string().green(),
        None => "none".red(),
    }
}

fn dump_addresses(spec: &'static ModelSpec) {
    let tree = StateTree::new(spec);
    println!(
        "\n{} {}",
        format!("=== Addresses ({}) ===", spec.name).bold().cyan(),
        tree.len().to_string().green()
    );
    for leaf in tree.leaves() {
        println!("  {:<40} {}", leaf.address(), leaf.kind().to_string().dimmed());
    }
}

fn print_variables(spec: &'static ModelSpec) {
    let vars = variables::variables(spec);
    println!(
        "\n{} {}",
        format!("=== Variables ({}) ===", spec.name).bold().cyan(),
        vars.len().to_string().green()
    );
    for var in &vars {
        println!(
            "  {:<24} {:<36} {}",
            var.name.yellow(),
            var.label,
            var.address.dimmed()
        );
    }
}

fn print_subscriptions(spec: &'static ModelSpec) {
    let subs = variables::subscriptions(spec);
    println!(
        "\n{} {}",
        format!("=== Subscriptions ({}) ===", spec.name).bold().cyan(),
        subs.len().to_string().green()
    );
    for sub in &subs {
        println!("  {:<28} {}", sub.name.yellow(), sub.address);
    }
}
