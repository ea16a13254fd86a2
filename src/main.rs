//! link-router
//!
//! Picks the browser that should open a link, based on wildcard rules.
//!
//! # Architecture Overview
//!
//! ```text
//!     URL (argument or stdin line)
//!         │
//!         ▼
//!     ┌──────────┐    ┌────────────┐    ┌──────────┐    ┌───────────┐
//!     │   uri    │───▶│  routing   │───▶│ pattern  │    │   model   │
//!     │normalize │    │ dispatcher │◀───│ matcher  │    │ browsers  │
//!     └──────────┘    └─────┬──────┘    └──────────┘    └─────┬─────┘
//!                           │                                 │
//!                           ▼                                 │
//!                     ┌───────────┐      Decision::Launch ◀───┘
//!                     │   store   │      Decision::Prompt
//!                     │ snapshots │
//!                     └─────▲─────┘
//!                           │
//!                     ┌─────┴─────┐      ┌───────────────┐
//!                     │  config   │      │ observability │
//!                     │  watcher  │      │ logs/metrics  │
//!                     └───────────┘      └───────────────┘
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use link_router::config::{load_config, ConfigError, ConfigWatcher, RouterConfig};
use link_router::model::LaunchPlan;
use link_router::observability::{logging, metrics};
use link_router::pattern::matches;
use link_router::routing::{Decision, Dispatcher};
use link_router::store::{InMemoryRuleStore, RuleStore};
use link_router::uri::{normalize_url, NormalizedUrl};

#[derive(Parser)]
#[command(name = "link-router")]
#[command(about = "Route links to the right browser", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "LINK_ROUTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level; overrides the configured one
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide which browser opens a URL
    Resolve {
        url: String,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
        /// Open in a private window
        #[arg(long)]
        incognito: bool,
    },
    /// Test a single pattern against a URL
    Match { pattern: String, url: String },
    /// Validate the configuration file
    Check,
    /// Show how a URL is normalized and decomposed
    Normalize { url: String },
    /// Resolve URLs read from stdin, one per line, reloading config on change
    Watch,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    #[serde(flatten)]
    decision: &'a Decision,
    command: Option<LaunchPlan>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("configuration has {} error(s):", errors.len());
            for error in &errors {
                eprintln!("  - {error}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    logging::init_logging(&level);

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn load(path: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RouterConfig::default()),
    }
}

async fn run(cli: Cli, config: RouterConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Resolve { url, json, incognito } => {
            let store = InMemoryRuleStore::from_rules(config.rules.clone())?;
            let decision = Dispatcher::new().dispatch(
                &url,
                &store.snapshot(),
                &config.browsers(),
                config.last_browser(),
            );

            let incognito = if incognito && !config.show_incognito() {
                tracing::warn!("Private windows are disabled in settings, ignoring --incognito");
                false
            } else {
                incognito
            };
            print_decision(&decision, incognito, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { pattern, url } => {
            let matched = matches(&pattern, &url);
            println!("{matched}");
            Ok(if matched { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Check => match cli.config {
            Some(path) => {
                println!(
                    "{}: ok ({} browsers, {} rules)",
                    path.display(),
                    config.browsers().len(),
                    config.rules.len()
                );
                Ok(ExitCode::SUCCESS)
            }
            None => Err("no configuration file given (use --config or LINK_ROUTER_CONFIG)".into()),
        },
        Commands::Normalize { url } => {
            let normalized = normalize_url(&url);
            let parts = NormalizedUrl::parse(&normalized);
            println!("url:    {normalized}");
            println!("domain: {}", parts.domain);
            println!("path:   {}", parts.path);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch => {
            watch(cli.config, config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_decision(decision: &Decision, incognito: bool, json: bool) -> Result<(), serde_json::Error> {
    let command = decision.launch_plan(incognito);
    if json {
        let output = ResolveOutput { decision, command };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match decision {
        Decision::Launch { rule, browser, .. } => {
            println!("rule:    #{} {} (priority {})", rule.id, rule.pattern, rule.priority);
            println!("browser: {}", browser.display_name());
            if let Some(plan) = command {
                println!("command: {plan}");
            }
        }
        Decision::Prompt {
            url,
            suggested_pattern,
            suggested_browser,
        } => {
            println!("no rule for {url}");
            println!("suggested pattern: {suggested_pattern}");
            if let Some(browser) = suggested_browser {
                println!("suggested browser: {browser}");
            }
        }
    }
    Ok(())
}

async fn watch(path: Option<PathBuf>, mut config: RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let store = InMemoryRuleStore::from_rules(config.rules.clone())?;
    let mut browsers = config.browsers();
    let dispatcher = Dispatcher::new();

    // Without a config file the channel closes at once and its select arm is disabled.
    let (_watcher, mut updates) = match &path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            let handle = watcher.with_current(config.clone()).run()?;
            (Some(handle), rx)
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    tracing::info!(rules = store.len(), browsers = browsers.len(), "Reading URLs from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let url = line.trim();
                if url.is_empty() {
                    continue;
                }
                let decision = dispatcher.dispatch(url, &store.snapshot(), &browsers, config.last_browser());
                println!("{}", serde_json::to_string(&decision)?);
            }
            Some(new_config) = updates.recv() => {
                match store.replace_all(new_config.rules.clone()) {
                    Ok(()) => {
                        browsers = new_config.browsers();
                        dispatcher.resolver().clear_cache();
                        config = new_config;
                        tracing::info!(rules = store.len(), "Rules reloaded");
                    }
                    Err(e) => tracing::error!(error = %e, "Rejected reloaded rules"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
