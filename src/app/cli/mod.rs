//! CLI Adapter.

mod create_domain;
mod init;
mod list;
mod run;
mod schedule;
mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::app::{api, logging};
use crate::domain::{AppError, LoggingConfig};

#[derive(Parser)]
#[command(name = "dataflow")]
#[command(version)]
#[command(
    about = "Compose per-domain pipeline configuration and run domains in batch or on schedules",
    long_about = None
)]
struct Cli {
    /// Configuration directory (default: $DATAFLOW_CONFIG_DIR or ./conf)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the selected domains once
    #[clap(visible_alias = "r")]
    Run {
        /// Domain to run (repeatable); replaces active_domains
        #[arg(short, long = "domain")]
        domains: Vec<String>,
        /// Tag to select (repeatable); replaces active_tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Named batch preset from [batches]
        #[arg(short, long)]
        batch: Option<String>,
        /// Show what would run without invoking pipelines
        #[arg(long)]
        dry_run: bool,
    },
    /// Run scheduled domains until interrupted
    #[clap(visible_alias = "s")]
    Schedule {
        /// Seconds to wait for running jobs on shutdown
        #[arg(long)]
        drain_timeout: Option<u64>,
        /// Fire every scheduled domain once at startup
        #[arg(long)]
        run_now: bool,
    },
    /// List composed domains
    #[clap(visible_alias = "ls")]
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose every domain and report configuration errors
    Validate,
    /// Write a starter configuration directory
    #[clap(visible_alias = "i")]
    Init {
        /// Replace an existing global configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Create a new domain document
    #[clap(visible_alias = "cr")]
    CreateDomain {
        /// Domain name
        name: Option<String>,
        /// Tag to assign (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    let config_dir = api::resolve_config_dir(cli.config_dir.as_deref());

    let logging_config = match cli.command {
        Commands::Init { .. } | Commands::CreateDomain { .. } => LoggingConfig::default(),
        _ => api::logging_config_at(&config_dir),
    };
    let log_guard = match logging::init(&logging_config, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("⚠️  Logging setup failed: {}", e);
            None
        }
    };

    let result: Result<i32, AppError> = match cli.command {
        Commands::Run { domains, tags, batch, dry_run } => {
            let options = api::RunOptions { domains, tags, batch, dry_run };
            run::run_domains(&config_dir, &options)
        }
        Commands::Schedule { drain_timeout, run_now } => {
            schedule::run_scheduler(&config_dir, drain_timeout, run_now)
        }
        Commands::List { json } => list::run_list(&config_dir, json).map(|_| 0),
        Commands::Validate => validate::run_validate(&config_dir),
        Commands::Init { force } => init::run_init(&config_dir, force).map(|_| 0),
        Commands::CreateDomain { name, tags } => {
            create_domain::run_create_domain(&config_dir, name, tags).map(|_| 0)
        }
    };

    let exit_code = match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // `process::exit` skips destructors; flush the log file first.
    drop(log_guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
