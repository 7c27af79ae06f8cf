//! tiplogger library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod state;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::clock::SystemClock;
use errors::AppResult;
use tracing_subscriber::EnvFilter;
use utils::path::expand_arg;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(cli, cfg),
        Commands::Prefs { .. } => cli::commands::prefs::handle(cli, cfg),
        Commands::Workplace { .. } => cli::commands::workplace::handle(cli, cfg),
        Commands::Shift { .. } => cli::commands::shift::handle(cli, cfg),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(cli, cfg, &SystemClock),
        Commands::Calendar { .. } => cli::commands::calendar::handle(cli, cfg, &SystemClock),
        Commands::Day { .. } => cli::commands::day::handle(cli, cfg),
        Commands::View => cli::commands::view::handle(cli, cfg, &SystemClock),
        Commands::Export { .. } => cli::commands::export::handle(cli, cfg),
    }
}

/// Diagnostics go to stderr so they never mix with command output.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "tiplogger=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // test runs never read the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_arg(custom_db);
    }

    tracing::debug!(db = %cfg.database, test = cli.test, "configuration resolved");

    dispatch(&cli, &cfg)
}
