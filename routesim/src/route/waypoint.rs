//! Named waypoints and the built-in demo route.

use crate::coord::Coordinate;

use super::Route;

/// Mapbox office, Washington, DC (demo origin).
pub const MAPBOX_DC: Coordinate = Coordinate::new(38.9131752, -77.0324047);

/// The White House, Washington, DC (demo destination).
pub const WHITE_HOUSE: Coordinate = Coordinate::new(38.8977, -77.0365);

/// A named stop along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Display name.
    pub name: String,
    /// Location of the stop.
    pub coordinate: Coordinate,
}

impl Waypoint {
    /// Create a new waypoint.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// The two fixed demo waypoints, origin first.
pub fn demo_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new("Mapbox", MAPBOX_DC),
        Waypoint::new("White House", WHITE_HOUSE),
    ]
}

/// Straight-line route between the demo waypoints.
///
/// Densified so consecutive points are at most `spacing_m` apart; pass a
/// non-positive spacing to get just the two waypoints.
pub fn demo_route(spacing_m: f64) -> Route {
    Route::from_waypoints(&demo_waypoints()).densify(spacing_m)
}
