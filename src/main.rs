//! containerctl: load container definitions and inspect the resolved result.
//!
//! # Architecture Overview
//!
//! ```text
//!   definitions file ──▶ source::FileSource ──▶ Transaction ──▶ ContainerConfig
//!   (JSON / TOML)                                 (commit)        (ArcSwap<Snapshot>)
//!                                                                        │
//!   config::DefinitionWatcher ── reload on change ──────────────────────┤
//!                                                                        ▼
//!                                                     list / show / get / watch
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use container_config::config::{load_config, DefinitionWatcher, SourceConfig, StoreConfig};
use container_config::observability::{logging, metrics};
use container_config::source::FileSource;
use container_config::ContainerConfig;

#[derive(Parser)]
#[command(name = "containerctl")]
#[command(about = "Resolve and inspect multi-tenant container configuration", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Definitions file (JSON or TOML). Overrides `source.path` from the settings.
    #[arg(short, long)]
    definitions: Option<PathBuf>,

    /// Defaults to `watch` when `source.watch` is set, `list` otherwise.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Commands {
    /// List every visible container name, aliases included
    List,
    /// Print the resolved properties of a container as JSON
    Show { container: String },
    /// Print a single resolved property
    Get { container: String, key: String },
    /// Keep running and reload whenever the definitions file changes
    Watch,
}

/// The subcommand to run when none was given on the command line.
fn effective_command(command: Option<Commands>, source: &SourceConfig) -> Commands {
    match command {
        Some(command) => command,
        None if source.watch => Commands::Watch,
        None => Commands::List,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => StoreConfig::default(),
    };
    logging::init_logging(&config.observability.log_level);

    let path = cli
        .definitions
        .clone()
        .or_else(|| config.source.path.clone())
        .ok_or("no definitions file given (use --definitions or source.path)")?;

    let store = ContainerConfig::with_settings(&config.containers);
    let source = FileSource::new(path, store.definition_keys().clone());
    let summary = store.reload(&source)?;

    tracing::info!(
        definitions = summary.definitions,
        visible = summary.visible,
        source = %source.path().display(),
        "Configuration loaded"
    );

    match effective_command(cli.command, &config.source) {
        Commands::List => {
            for name in store.get_containers() {
                println!("{}", name);
            }
        }
        Commands::Show { container } => {
            let properties = store
                .get_properties(&container)
                .ok_or_else(|| format!("unknown container '{}'", container))?;
            println!("{}", serde_json::to_string_pretty(properties.as_ref())?);
        }
        Commands::Get { container, key } => {
            let value = store
                .get(&container, &key)
                .ok_or_else(|| format!("'{}' has no property '{}'", container, key))?;
            println!("{}", value);
        }
        Commands::Watch => watch(&store, source, &config).await?,
    }

    Ok(())
}

async fn watch(
    store: &ContainerConfig,
    source: FileSource,
    config: &StoreConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let poll_interval = Duration::from_secs(config.source.poll_interval_secs);
    let (watcher, mut updates) = DefinitionWatcher::new(source, poll_interval);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(definitions) = update else { break };
                match store.replace_all(definitions) {
                    Ok(summary) => tracing::info!(
                        definitions = summary.definitions,
                        visible = summary.visible,
                        "Reloaded container configuration"
                    ),
                    Err(e) => tracing::error!(error = %e, "Reload rejected, keeping current configuration"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_setting_selects_watch_without_subcommand() {
        let source = SourceConfig {
            watch: true,
            ..SourceConfig::default()
        };
        assert_eq!(effective_command(None, &source), Commands::Watch);
    }

    #[test]
    fn test_list_is_the_default_subcommand() {
        assert_eq!(effective_command(None, &SourceConfig::default()), Commands::List);
    }

    #[test]
    fn test_explicit_subcommand_wins_over_watch_setting() {
        let source = SourceConfig {
            watch: true,
            ..SourceConfig::default()
        };
        let cli = Cli::parse_from(["containerctl", "get", "default", "timeout"]);
        assert_eq!(
            effective_command(cli.command, &source),
            Commands::Get {
                container: "default".to_string(),
                key: "timeout".to_string(),
            }
        );
    }
}
