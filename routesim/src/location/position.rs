//! Position records delivered to observers.

use chrono::{DateTime, Utc};

use crate::coord::Coordinate;

/// A single location fix.
///
/// The route replay only knows where it is, so every sensor field other than
/// the coordinate is left unknown (`None`), the same as a real receiver that
/// has not computed it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Reported location.
    pub coordinate: Coordinate,
    /// Altitude above sea level in meters.
    pub altitude: Option<f64>,
    /// Radius of horizontal uncertainty in meters.
    pub horizontal_accuracy: Option<f64>,
    /// Vertical uncertainty in meters.
    pub vertical_accuracy: Option<f64>,
    /// Direction of travel in degrees from true north.
    pub course: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
    /// When the fix was produced.
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// A fix at `coordinate`, stamped now, with all other fields unknown.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            altitude: None,
            horizontal_accuracy: None,
            vertical_accuracy: None,
            course: None,
            speed: None,
            timestamp: Utc::now(),
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}
