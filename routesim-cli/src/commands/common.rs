//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use routesim::config::ConfigFile;
use routesim::route::{demo_route, Route, MIN_SEGMENT_SPACING_M};
use tracing::info;

use crate::error::CliError;

/// Route source resolved from CLI arguments and the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSource {
    /// GeoJSON file, or `None` for the built-in demo route
    pub file: Option<PathBuf>,
    /// Maximum distance between replayed points in meters
    pub spacing_m: f64,
}

impl RouteSource {
    /// Resolve the route source, preferring CLI arguments over config values.
    pub fn resolve(
        route_arg: Option<PathBuf>,
        spacing_arg: Option<f64>,
        config: &ConfigFile,
    ) -> Result<Self, CliError> {
        let spacing_m = spacing_arg.unwrap_or(config.route.spacing_m);
        if spacing_m != 0.0 && !(spacing_m.is_finite() && spacing_m >= MIN_SEGMENT_SPACING_M) {
            return Err(CliError::Config(format!(
                "Route spacing must be 0 or at least {} meters, got {}",
                MIN_SEGMENT_SPACING_M, spacing_m
            )));
        }

        Ok(Self {
            file: route_arg.or_else(|| config.route.file.clone()),
            spacing_m,
        })
    }

    /// Human-readable description of where the route comes from.
    pub fn describe(&self) -> String {
        match &self.file {
            Some(path) => path.display().to_string(),
            None => "built-in demo (Mapbox DC to White House)".to_string(),
        }
    }

    /// Load the route and densify it to the configured spacing.
    pub fn load(&self) -> Result<Route, CliError> {
        let route = match &self.file {
            Some(path) => Route::from_geojson_file(path)?.densify(self.spacing_m),
            None => demo_route(self.spacing_m),
        };

        info!(
            source = %self.describe(),
            points = route.len(),
            distance_m = route.distance(),
            "Route loaded"
        );
        Ok(route)
    }
}

/// Format a distance in meters for display.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}
