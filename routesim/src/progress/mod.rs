//! Route progress tracking.
//!
//! Follows a position along a route and reports how far it has travelled and
//! what remains. The remaining path is what a map would redraw after each
//! update, shrinking the highlighted route from the front as the vehicle
//! moves.
//!
//! # Design
//!
//! - Each update projects the position onto the closest route leg
//! - Projection uses a local equirectangular approximation per leg, which is
//!   accurate at road-segment scale
//! - Progress is not forced to be monotone; a replay that wraps to the origin
//!   reports zero again

use std::sync::Arc;

use crate::coord::{haversine_distance, interpolate, Coordinate};
use crate::location::Position;
use crate::route::Route;

/// Tracks progress of a position along a fixed route.
///
/// # Usage
///
/// ```ignore
/// let mut progress = RouteProgress::new(route.clone());
///
/// progress.update(&position);
/// println!("{:.0}m to go", progress.distance_remaining());
/// let remaining = progress.remaining_path();
/// ```
#[derive(Debug, Clone)]
pub struct RouteProgress {
    route: Arc<Route>,
    /// Distance along the route to each vertex.
    cumulative: Vec<f64>,
    /// Total route length in meters.
    total: f64,
    /// Along-route distance of the last update.
    distance_traveled: f64,
    /// Distance from the last position to the route, in meters.
    off_route: f64,
    /// Number of updates applied.
    updates: u64,
}

impl RouteProgress {
    /// Start tracking progress along `route`.
    pub fn new(route: Arc<Route>) -> Self {
        let cumulative = route.cumulative_distances();
        let total = cumulative.last().copied().unwrap_or(0.0);
        Self {
            route,
            cumulative,
            total,
            distance_traveled: 0.0,
            off_route: 0.0,
            updates: 0,
        }
    }

    /// Apply a new position. Returns the distance travelled along the route.
    pub fn update(&mut self, position: &Position) -> f64 {
        self.updates += 1;

        let coords = self.route.coordinates();
        match coords {
            [] => {}
            [only] => {
                self.distance_traveled = 0.0;
                self.off_route = haversine_distance(only, &position.coordinate);
            }
            _ => {
                let mut best: Option<(f64, f64)> = None;
                for (i, leg) in coords.windows(2).enumerate() {
                    let t = project_onto_leg(&leg[0], &leg[1], &position.coordinate);
                    let closest = interpolate(&leg[0], &leg[1], t);
                    let offset = haversine_distance(&closest, &position.coordinate);
                    let along = self.cumulative[i] + t * (self.cumulative[i + 1] - self.cumulative[i]);

                    if best.map_or(true, |(best_offset, _)| offset < best_offset) {
                        best = Some((offset, along));
                    }
                }
                if let Some((offset, along)) = best {
                    self.off_route = offset;
                    self.distance_traveled = along;
                }
            }
        }

        tracing::trace!(
            traveled_m = format!("{:.1}", self.distance_traveled),
            remaining_m = format!("{:.1}", self.distance_remaining()),
            off_route_m = format!("{:.1}", self.off_route),
            "Route progress updated"
        );

        self.distance_traveled
    }

    /// The route being tracked.
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Total route length in meters.
    pub fn total_distance(&self) -> f64 {
        self.total
    }

    /// Distance travelled along the route, in meters.
    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    /// Distance left to the destination, in meters.
    pub fn distance_remaining(&self) -> f64 {
        (self.total - self.distance_traveled).max(0.0)
    }

    /// Fraction of the route completed (0.0 - 1.0).
    pub fn fraction_traveled(&self) -> f64 {
        if self.total > 0.0 {
            (self.distance_traveled / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Distance from the last position to the closest point on the route.
    pub fn off_route_distance(&self) -> f64 {
        self.off_route
    }

    /// Number of updates applied so far.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// The part of the route still ahead.
    ///
    /// Returns `None` for an empty route.
    pub fn remaining_path(&self) -> Option<Route> {
        self.route.trimmed(self.distance_traveled, self.total)
    }
}

/// Fractional position (0.0 - 1.0) of the point on leg `a -> b` closest to `p`.
fn project_onto_leg(a: &Coordinate, b: &Coordinate, p: &Coordinate) -> f64 {
    let scale = ((a.latitude + b.latitude) / 2.0).to_radians().cos();
    let dx = (b.longitude - a.longitude) * scale;
    let dy = b.latitude - a.latitude;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return 0.0;
    }

    let px = (p.longitude - a.longitude) * scale;
    let py = p.latitude - a.latitude;
    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{demo_route, MAPBOX_DC, WHITE_HOUSE};

    fn at(lat: f64, lon: f64) -> Position {
        Position::from_coordinate(Coordinate::new(lat, lon))
    }

    #[test]
    fn test_new_progress_starts_at_zero() {
        let route = Arc::new(demo_route(0.0));
        let progress = RouteProgress::new(route.clone());

        assert_eq!(progress.distance_traveled(), 0.0);
        assert_eq!(progress.fraction_traveled(), 0.0);
        assert!((progress.distance_remaining() - route.distance()).abs() < 1e-9);
        assert_eq!(progress.update_count(), 0);
    }

    #[test]
    fn test_progress_at_each_vertex_matches_cumulative_distance() {
        let route = Arc::new(demo_route(100.0));
        let cumulative = route.cumulative_distances();
        let mut progress = RouteProgress::new(route.clone());

        for (coord, expected) in route.coordinates().iter().zip(cumulative.iter()) {
            let traveled = progress.update(&Position::from_coordinate(*coord));
            assert!(
                (traveled - expected).abs() < 0.5,
                "Expected {}m, got {}m",
                expected,
                traveled
            );
            assert!(progress.off_route_distance() < 0.5);
        }

        assert!((progress.fraction_traveled() - 1.0).abs() < 1e-3);
        assert!(progress.distance_remaining() < 0.5);
    }

    #[test]
    fn test_progress_wraps_back_to_origin() {
        let route = Arc::new(demo_route(0.0));
        let mut progress = RouteProgress::new(route);

        progress.update(&Position::from_coordinate(WHITE_HOUSE));
        assert!(progress.fraction_traveled() > 0.99);

        progress.update(&Position::from_coordinate(MAPBOX_DC));
        assert!(progress.distance_traveled() < 1e-6);
    }

    #[test]
    fn test_off_route_position_projects_onto_leg() {
        // Leg due north along the prime meridian
        let route = Arc::new(Route::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.01, 0.0),
        ]));
        let mut progress = RouteProgress::new(route.clone());

        // Halfway up, ~111m east of the road
        progress.update(&at(0.005, 0.001));

        assert!((progress.fraction_traveled() - 0.5).abs() < 1e-6);
        assert!((progress.off_route_distance() - 111.2).abs() < 1.0);
    }

    #[test]
    fn test_remaining_path_shrinks() {
        let route = Arc::new(demo_route(100.0));
        let mut progress = RouteProgress::new(route.clone());

        progress.update(&Position::from_coordinate(route.coordinates()[5]));
        let remaining = progress.remaining_path().unwrap();

        assert_eq!(remaining.last(), route.last());
        assert!((remaining.distance() - progress.distance_remaining()).abs() < 1.0);
        assert!(remaining.distance() < route.distance());
    }

    #[test]
    fn test_empty_route() {
        let mut progress = RouteProgress::new(Arc::new(Route::empty()));
        progress.update(&at(1.0, 1.0));

        assert_eq!(progress.total_distance(), 0.0);
        assert_eq!(progress.fraction_traveled(), 0.0);
        assert!(progress.remaining_path().is_none());
        assert_eq!(progress.update_count(), 1);
    }

    #[test]
    fn test_project_onto_degenerate_leg() {
        let a = Coordinate::new(1.0, 1.0);
        assert_eq!(project_onto_leg(&a, &a, &Coordinate::new(2.0, 2.0)), 0.0);
    }
}
