//! RouteSim CLI - replay a driving route as a simulated live location feed.
//!
//! # Examples
//!
//! ```bash
//! # Replay the built-in demo route, one fix per second, until Ctrl+C
//! routesim replay
//!
//! # Replay a GeoJSON route ten times faster and stop after 50 fixes
//! routesim replay --route drive.geojson --interval-ms 100 --ticks 50
//!
//! # Inspect the route a replay would use
//! routesim route --spacing 10
//!
//! # Create ~/.routesim/config.ini with defaults
//! routesim config init
//! ```

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::replay::ReplayArgs;
use commands::route::RouteArgs;

#[derive(Parser)]
#[command(name = "routesim")]
#[command(version = routesim::VERSION)]
#[command(about = "Replay a driving route as a simulated live location feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a route as a stream of positions
    Replay(ReplayArgs),

    /// Show a summary of the route that would be replayed
    Route(RouteArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Route(args) => commands::route::run(args),
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
