//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show`, and `config init` for inspecting
//! and creating the configuration file.

use clap::Subcommand;
use routesim::config::{config_file_path, ConfigFile};

use super::common::format_distance;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,

    /// Create the configuration file with default values if it doesn't exist
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init => run_init(),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Show the effective configuration.
fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    if path.exists() {
        println!("(from {})", path.display());
    } else {
        println!("(defaults, {} not found)", path.display());
    }
    println!();

    println!("[feed]");
    println!("  interval_ms = {}", config.feed.interval_ms);
    println!("  label = {}", config.feed.label);
    println!();

    println!("[route]");
    match &config.route.file {
        Some(file) => println!("  file = {}", file.display()),
        None => println!("  file = (not set, built-in demo route)"),
    }
    println!(
        "  spacing_m = {} ({})",
        config.route.spacing_m,
        format_distance(config.route.spacing_m)
    );
    println!();

    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

/// Create the configuration file if it doesn't exist.
fn run_init() -> Result<(), CliError> {
    let path = config_file_path();
    if path.exists() {
        println!("Configuration file already exists at {}", path.display());
        return Ok(());
    }

    let path = ConfigFile::ensure_exists()?;
    println!("Created configuration file at {}", path.display());
    Ok(())
}
