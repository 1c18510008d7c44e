//! Typed models for routing-service response payloads.
//!
//! Two payload shapes are supported:
//!
//! - [`OrsDirectionsResponse`]: an OpenRouteService directions response
//!   (GeoJSON feature collection, one feature per route alternative).
//! - [`GoogleRoutePayload`]: a flattened Google Directions route object
//!   as stored by the route-generation tooling.
//!
//! Both convert into the normalized [`RouteRecord`], which is the only
//! shape the rest of the crate operates on. Parsing is strict about
//! structure (coordinates, required summary fields) but tolerant about
//! extras: unrecognized criterion keys are dropped.

use std::collections::HashMap;

use geo::{Coord, LineString};
use serde::Deserialize;

use crate::error::{Result, RouteAnalysisError};
use crate::extras::{Criterion, ExtraInfo};
use crate::RouteRecord;

/// An OpenRouteService directions response (GeoJSON).
#[derive(Debug, Clone, Deserialize)]
pub struct OrsDirectionsResponse {
    /// One feature per route; the first is the recommended route, the
    /// rest are alternatives.
    pub features: Vec<OrsFeature>,
}

/// One route feature of an ORS directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrsFeature {
    pub geometry: PayloadGeometry,
    pub properties: OrsProperties,
}

/// GeoJSON LineString geometry as raw coordinate positions.
///
/// Positions may carry a third (elevation) element; anything beyond
/// longitude and latitude is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadGeometry {
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrsProperties {
    pub summary: OrsSummary,
    #[serde(default)]
    pub extras: HashMap<String, ExtraInfo>,
    #[serde(default)]
    pub ascent: Option<f64>,
    #[serde(default)]
    pub descent: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrsSummary {
    /// Seconds.
    pub duration: f64,
    /// Meters.
    pub distance: f64,
}

impl OrsDirectionsResponse {
    /// Parse a raw JSON response body.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse an already-deserialized JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert every feature into a [`RouteRecord`].
    ///
    /// The first route keeps `request_id` as its id; alternatives get an
    /// `_alt<N>` suffix.
    pub fn into_records(self, request_id: &str) -> Result<Vec<RouteRecord>> {
        self.features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                let route_id = if index == 0 {
                    request_id.to_string()
                } else {
                    format!("{}_alt{}", request_id, index)
                };
                feature.into_record(route_id)
            })
            .collect()
    }
}

impl OrsFeature {
    fn into_record(self, route_id: String) -> Result<RouteRecord> {
        let geometry = parse_coordinates(&route_id, &self.geometry.coordinates)?;
        let extras = self
            .properties
            .extras
            .into_iter()
            .filter_map(|(key, info)| Criterion::from_key(&key).map(|criterion| (criterion, info)))
            .collect();

        Ok(RouteRecord {
            route_id,
            geometry,
            duration: self.properties.summary.duration,
            duration_in_traffic: None,
            distance: self.properties.summary.distance,
            ascent: self.properties.ascent,
            descent: self.properties.descent,
            departure_hour: None,
            extras,
        })
    }
}

/// A flattened Google Directions route object.
///
/// This is the per-route shape the generation scripts persist: scalar
/// summary fields plus the decoded overview polyline as raw coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleRoutePayload {
    pub id: String,
    /// Decoded polyline as (longitude, latitude) positions.
    pub geometry: Vec<Vec<f64>>,
    /// Seconds, without traffic modeling.
    pub duration: f64,
    /// Seconds, with traffic modeling for the requested departure time.
    #[serde(default)]
    pub duration_in_traffic: Option<f64>,
    /// Meters.
    pub distance: f64,
    #[serde(default)]
    pub departure_time: Option<String>,
    /// Departure hour tag, e.g. "8".
    #[serde(default)]
    pub hour: Option<String>,
}

impl GoogleRoutePayload {
    /// Parse a raw JSON route object.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parse an already-deserialized JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Convert into a [`RouteRecord`].
    pub fn into_record(self) -> Result<RouteRecord> {
        let geometry = parse_coordinates(&self.id, &self.geometry)?;

        Ok(RouteRecord {
            route_id: self.id,
            geometry,
            duration: self.duration,
            duration_in_traffic: self.duration_in_traffic,
            distance: self.distance,
            ascent: None,
            descent: None,
            departure_hour: self.hour,
            extras: HashMap::new(),
        })
    }
}

/// Build a linestring from raw positions, validating arity.
fn parse_coordinates(route_id: &str, raw: &[Vec<f64>]) -> Result<LineString<f64>> {
    let mut coords = Vec::with_capacity(raw.len());
    for position in raw {
        if position.len() < 2 {
            return Err(RouteAnalysisError::MalformedPayload {
                reason: format!(
                    "route '{}': coordinate position with {} element(s), expected [lon, lat, ...]",
                    route_id,
                    position.len()
                ),
            });
        }
        coords.push(Coord {
            x: position[0],
            y: position[1],
        });
    }
    Ok(LineString::new(coords))
}
