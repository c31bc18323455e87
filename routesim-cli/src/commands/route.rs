//! Route summary command.

use std::path::PathBuf;

use clap::Args;
use routesim::config::ConfigFile;
use routesim::coord::initial_bearing;

use super::common::{format_distance, RouteSource};
use crate::error::CliError;

/// Arguments for the route command.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// GeoJSON file containing the route (default: config or built-in demo)
    #[arg(long)]
    pub route: Option<PathBuf>,

    /// Maximum distance between replayed points in meters (0 keeps the raw shape)
    #[arg(long)]
    pub spacing: Option<f64>,
}

/// Print a summary of the route that `replay` would use.
pub fn run(args: RouteArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let source = RouteSource::resolve(args.route, args.spacing, &config)?;
    let route = source.load()?;

    println!("Route Summary");
    println!("=============");
    println!();
    println!("Source:   {}", source.describe());
    println!("Spacing:  {}", format_distance(source.spacing_m));
    println!("Points:   {}", route.len());
    println!("Length:   {}", format_distance(route.distance()));

    match (route.first(), route.last()) {
        (Some(origin), Some(destination)) => {
            println!("Origin:   {}", origin);
            println!("Destination: {}", destination);
            if route.len() > 1 {
                println!(
                    "Bearing:  {:.0}° (origin to destination)",
                    initial_bearing(origin, destination)
                );
            }
        }
        _ => {
            println!();
            println!("The route is empty; replay will not emit any positions.");
        }
    }

    Ok(())
}
