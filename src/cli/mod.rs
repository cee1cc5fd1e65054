//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod browse;
mod placeholder;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, GalleryConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Seagallery - browse the species API from the terminal
#[derive(Parser)]
#[command(name = "seagallery")]
#[command(about = "Seagallery - browse the species API from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args)]
pub struct GlobalArgs {
    /// Path to gallery.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use the legacy /creatures endpoints
    #[arg(long, global = true)]
    pub legacy: bool,

    /// Compose image paths against this page URL
    #[arg(long, global = true)]
    pub page_base: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the species collection and print the grid
    Grid,

    /// Load a single species and print its detail panel
    Info {
        /// Species identifier
        id: String,
    },

    /// Print the inline placeholder image as a data URI
    Placeholder {
        /// Print the SVG markup instead of the data URI
        #[arg(long)]
        svg: bool,
    },
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "seagallery=debug" } else { "seagallery=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Load configuration and apply the global flags.
fn resolve_config(global: &GlobalArgs) -> Result<GalleryConfig, ExitCode> {
    let mut config = match load_config(global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    let overrides = CliOverrides {
        api_url: global.api_url.clone(),
        legacy: global.legacy.then_some(true),
    };
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in errors {
            eprintln!("Error: {}", e);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    Ok(config)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let config = match resolve_config(&cli.global) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let page_base = cli.global.page_base.as_deref();

    match cli.command {
        Commands::Grid => browse::run_grid(&config, page_base),
        Commands::Info { id } => browse::run_info(&config, page_base, &id),
        Commands::Placeholder { svg } => placeholder::run_placeholder(&config, svg),
    }
}
