//! Route shapes and waypoint handling.
//!
//! A [`Route`] is the ordered list of coordinates a previously computed route
//! follows (its "shape"). Routes are immutable once built and are shared with
//! the location feed through an `Arc`.
//!
//! # Sources
//!
//! - [`Route::from_geojson_file`] - a GeoJSON `LineString`, `Feature` or
//!   `FeatureCollection` exported from a directions service
//! - [`demo_route`] - the built-in two-waypoint route through Washington, DC
//! - [`Route::new`] - any coordinate list
//!
//! # Example
//!
//! ```
//! use routesim::route::{demo_route, Route};
//!
//! let route = demo_route(50.0);
//! assert!(route.len() > 2);
//!
//! // Everything still ahead after 500m
//! let remaining = route.trimmed(500.0, route.distance()).unwrap();
//! assert!(remaining.distance() < route.distance());
//! ```

mod geojson;
mod waypoint;

pub use waypoint::{demo_route, demo_waypoints, Waypoint, MAPBOX_DC, WHITE_HOUSE};

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coord::{haversine_distance, interpolate, CoordError, Coordinate};

/// Smallest densification spacing, in meters; finer spacings are raised to this.
pub const MIN_SEGMENT_SPACING_M: f64 = 0.1;

/// Errors that can occur while loading a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Failed to read the route file
    #[error("Failed to read route file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid GeoJSON
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no LineString to follow
    #[error("GeoJSON document contains no LineString geometry")]
    MissingLineString,

    /// A position in the LineString is malformed or out of range
    #[error("Invalid coordinate at index {index}: {reason}")]
    InvalidCoordinate { index: usize, reason: String },
}

impl RouteError {
    fn coordinate(index: usize, err: CoordError) -> Self {
        RouteError::InvalidCoordinate {
            index,
            reason: err.to_string(),
        }
    }
}

/// An ordered sequence of coordinates describing a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    coordinates: Vec<Coordinate>,
}

impl Route {
    /// Create a route from a list of coordinates.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }

    /// A route with no coordinates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a route that visits the given waypoints in order.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Self {
        Self::new(waypoints.iter().map(|w| w.coordinate).collect())
    }

    /// Parse a route from a GeoJSON document.
    pub fn from_geojson_str(json: &str) -> Result<Self, RouteError> {
        geojson::parse_line_string(json).map(Self::new)
    }

    /// Load a route from a GeoJSON file.
    pub fn from_geojson_file(path: &Path) -> Result<Self, RouteError> {
        let json = std::fs::read_to_string(path).map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let route = Self::from_geojson_str(&json)?;

        tracing::debug!(
            path = %path.display(),
            points = route.len(),
            distance_m = format!("{:.0}", route.distance()),
            "Loaded route"
        );

        Ok(route)
    }

    /// Number of coordinates in the route.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Returns true if the route has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Coordinate at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coordinates.get(index)
    }

    /// All coordinates in order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// First coordinate (the origin).
    pub fn first(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    /// Last coordinate (the destination).
    pub fn last(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }

    /// Total length of the path in meters.
    ///
    /// Routes with fewer than two points have zero length.
    pub fn distance(&self) -> f64 {
        self.coordinates
            .windows(2)
            .map(|leg| haversine_distance(&leg[0], &leg[1]))
            .sum()
    }

    /// Distance along the route to each coordinate, in meters.
    ///
    /// The first entry is always 0 and the last equals [`Route::distance`].
    pub fn cumulative_distances(&self) -> Vec<f64> {
        let mut travelled = 0.0;
        let mut distances = Vec::with_capacity(self.coordinates.len());
        for (i, coord) in self.coordinates.iter().enumerate() {
            if i > 0 {
                travelled += haversine_distance(&self.coordinates[i - 1], coord);
            }
            distances.push(travelled);
        }
        distances
    }

    /// The point `distance_m` meters along the route.
    ///
    /// Distances are clamped to the route, so negative values give the origin
    /// and values past the end give the destination.
    pub fn point_at_distance(&self, distance_m: f64) -> Option<Coordinate> {
        let first = *self.coordinates.first()?;
        if distance_m <= 0.0 {
            return Some(first);
        }

        let mut travelled = 0.0;
        for leg in self.coordinates.windows(2) {
            let leg_len = haversine_distance(&leg[0], &leg[1]);
            if travelled + leg_len >= distance_m {
                if leg_len == 0.0 {
                    return Some(leg[0]);
                }
                let fraction = (distance_m - travelled) / leg_len;
                return Some(interpolate(&leg[0], &leg[1], fraction));
            }
            travelled += leg_len;
        }

        self.coordinates.last().copied()
    }

    /// The part of the route between two distances along it.
    ///
    /// Cut points are interpolated onto their legs; vertices strictly between
    /// them are kept. Returns `None` for an empty route or when `from_m` is
    /// greater than `to_m`. Both distances are clamped to the route length.
    pub fn trimmed(&self, from_m: f64, to_m: f64) -> Option<Route> {
        if self.is_empty() || from_m.is_nan() || to_m.is_nan() || from_m > to_m {
            return None;
        }

        let total = self.distance();
        let from = from_m.clamp(0.0, total);
        let to = to_m.clamp(0.0, total);

        let mut coordinates = vec![self.point_at_distance(from)?];
        let mut travelled = 0.0;
        for leg in self.coordinates.windows(2) {
            travelled += haversine_distance(&leg[0], &leg[1]);
            if travelled > from && travelled < to {
                coordinates.push(leg[1]);
            }
        }
        coordinates.push(self.point_at_distance(to)?);

        Some(Route::new(coordinates))
    }

    /// A copy of the route with extra points so no leg exceeds `max_segment_m`.
    ///
    /// Original vertices are preserved. A non-positive spacing returns an
    /// unchanged copy; positive spacings below [`MIN_SEGMENT_SPACING_M`] are
    /// raised to it.
    pub fn densify(&self, max_segment_m: f64) -> Route {
        if max_segment_m.is_nan() || max_segment_m <= 0.0 || self.len() < 2 {
            return self.clone();
        }
        let max_segment_m = max_segment_m.max(MIN_SEGMENT_SPACING_M);

        let mut coordinates = Vec::with_capacity(self.len());
        coordinates.push(self.coordinates[0]);
        for leg in self.coordinates.windows(2) {
            let leg_len = haversine_distance(&leg[0], &leg[1]);
            let steps = (leg_len / max_segment_m).ceil().max(1.0) as usize;
            for step in 1..steps {
                coordinates.push(interpolate(&leg[0], &leg[1], step as f64 / steps as f64));
            }
            coordinates.push(leg[1]);
        }

        Route::new(coordinates)
    }
}

impl From<Vec<Coordinate>> for Route {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self::new(coordinates)
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
