//! Geographic coordinate module
//!
//! Provides the [`Coordinate`] type along with the small amount of spherical
//! geometry the route replay needs: great-circle distance, initial bearing,
//! and interpolation between two points.

mod types;

pub use types::{Coordinate, CoordError, EARTH_RADIUS_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Great-circle distance between two coordinates in meters (haversine).
#[inline]
pub fn haversine_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `a` towards `b`.
///
/// Returns bearing in degrees (0-360), where 0 = North, 90 = East.
pub fn initial_bearing(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let bearing_deg = y.atan2(x).to_degrees();

    // Normalize to 0-360
    if bearing_deg < 0.0 {
        bearing_deg + 360.0
    } else {
        bearing_deg
    }
}

/// Linear interpolation between two coordinates.
///
/// `fraction` is clamped to `0.0..=1.0`. Treats lat/lon as planar, which is
/// accurate enough for the short legs of a road route.
pub fn interpolate(a: &Coordinate, b: &Coordinate, fraction: f64) -> Coordinate {
    let t = fraction.clamp(0.0, 1.0);
    Coordinate::new(
        a.latitude + (b.latitude - a.latitude) * t,
        a.longitude + (b.longitude - a.longitude) * t,
    )
}
