//! modelrepo CLI - versioned model artifact registry
//!
//! Usage: modelrepo <COMMAND>
//!
//! Commands:
//!   init     Create (or upgrade) a model repository
//!   deploy   Publish a new model version
//!   get      Show one published model
//!   list     List published models
//!   update   Change a model's production-ready flag
//!   remove   Remove a model version
//!   check    Verify stored packages
//!   upgrade  Bring the repository to the latest layout
//!   drop     Delete the repository

mod cli;
mod commands;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Parser;
use modelrepo::config::{self, Config, ConfigWarning};
use modelrepo::presentation::OutputFormat;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::deploy::DeployArgs;
use commands::Context;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        if json {
            println!(
                "{}",
                serde_json::json!({ "event": "error", "message": format!("{err:#}") })
            );
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, warnings) = load_config(cli.config.as_deref())?;
    init_tracing(config.output.verbosity.bumped(cli.verbose).filter_directive());
    report_config_warnings(&warnings);

    let ctx = Context {
        root: cli.repo.unwrap_or_else(|| config.repository.path.clone()),
        format: OutputFormat::from_json_flag(cli.json),
        config,
    };

    match cli.command {
        Commands::Init { base_storage } => commands::lifecycle::run_init(&ctx, base_storage),
        Commands::Upgrade => commands::lifecycle::run_upgrade(&ctx),
        Commands::Drop { yes } => commands::lifecycle::run_drop(&ctx, yes),
        Commands::Deploy {
            identity,
            artifact,
            deps,
            clone_from,
            container,
            production_ready,
            message,
        } => commands::deploy::run(
            &ctx,
            DeployArgs {
                identity,
                artifact,
                deps,
                clone_from,
                container,
                production_ready,
                message,
            },
        ),
        Commands::Get { identity, fields } => commands::query::run_get(&ctx, &identity, fields),
        Commands::List {
            fields,
            max_versions,
            production_ready,
        } => commands::query::run_list(&ctx, fields, max_versions, production_ready),
        Commands::Update {
            identity,
            production_ready,
            message,
        } => commands::readiness::run_update(
            &ctx,
            &identity,
            production_ready,
            message.as_deref(),
        ),
        Commands::Remove { identity, force } => {
            commands::readiness::run_remove(&ctx, &identity, force)
        }
        Commands::Check { download } => commands::query::run_check(&ctx, download),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<(Config, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => {
            let (config, warnings) = config::load_with_warnings(path)?;
            Ok((config::with_env_overrides(config), warnings))
        }
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(config::load_layered(&cwd)?)
        }
    }
}

fn init_tracing(default_filter: &str) {
    // RUST_LOG wins over -v and the configured verbosity
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn report_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        let line = warning
            .line
            .map(|l| format!(":{l}"))
            .unwrap_or_default();
        match &warning.suggestion {
            Some(suggestion) => warn!(
                "unknown config key '{}' in {}{}; did you mean '{}'?",
                warning.key,
                warning.file.display(),
                line,
                suggestion
            ),
            None => warn!(
                "unknown config key '{}' in {}{}",
                warning.key,
                warning.file.display(),
                line
            ),
        }
    }
}
