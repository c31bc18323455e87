//! Minimal GeoJSON reader for route shapes.
//!
//! Only the parts needed to recover a route's LineString are modelled. Other
//! geometry types are skipped. GeoJSON positions are `[longitude, latitude]`
//! with an optional altitude that is ignored.

use serde::Deserialize;

use crate::coord::Coordinate;

use super::RouteError;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonObject {
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    Feature {
        #[serde(default)]
        geometry: Option<Box<GeoJsonObject>>,
    },
    FeatureCollection {
        features: Vec<GeoJsonObject>,
    },
    #[serde(other)]
    Unsupported,
}

impl GeoJsonObject {
    /// First LineString found, depth first.
    fn into_line_string(self) -> Option<Vec<Vec<f64>>> {
        match self {
            GeoJsonObject::LineString { coordinates } => Some(coordinates),
            GeoJsonObject::Feature { geometry } => geometry.and_then(|g| g.into_line_string()),
            GeoJsonObject::FeatureCollection { features } => features
                .into_iter()
                .find_map(GeoJsonObject::into_line_string),
            GeoJsonObject::Unsupported => None,
        }
    }
}

/// Extract the coordinates of the first LineString in a GeoJSON document.
pub(super) fn parse_line_string(json: &str) -> Result<Vec<Coordinate>, RouteError> {
    let object: GeoJsonObject = serde_json::from_str(json)?;
    let positions = object
        .into_line_string()
        .ok_or(RouteError::MissingLineString)?;

    positions
        .iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [lon, lat, ..] => {
                Coordinate::try_new(*lat, *lon).map_err(|e| RouteError::coordinate(index, e))
            }
            _ => Err(RouteError::InvalidCoordinate {
                index,
                reason: format!("expected [lon, lat], got {} values", position.len()),
            }),
        })
        .collect()
}
