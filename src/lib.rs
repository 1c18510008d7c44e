//! # Route Analyst
//!
//! Comparative statistics between routes from a traffic-unaware routing
//! engine (e.g. a self-hosted OpenRouteService instance) and a
//! traffic-aware one (e.g. the Google Directions API).
//!
//! This library provides:
//! - A normalized [`RouteRecord`] over routing-service response payloads
//! - Run-length-encoded extras decoding and weighted aggregation
//! - Pairwise divergence metrics: duration/distance deltas, geometry
//!   overlap deficit and Hausdorff distance
//! - Batch analysis producing flat rows for tabular export
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch analysis with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use geo::line_string;
//! use route_analyst::{compare, CompareConfig, RouteRecord};
//!
//! // Baseline: the traffic-unaware engine's route
//! let baseline = RouteRecord::new(
//!     "ors-h8-42",
//!     line_string![(x: 8.680, y: 49.410), (x: 8.685, y: 49.412), (x: 8.690, y: 49.415)],
//!     300.0,
//!     1250.0,
//! );
//!
//! // The traffic-aware engine's route for the same trip
//! let mut rival = RouteRecord::new(
//!     "google-h8-42",
//!     line_string![(x: 8.680, y: 49.410), (x: 8.685, y: 49.412), (x: 8.690, y: 49.415)],
//!     280.0,
//!     1250.0,
//! );
//! rival.duration_in_traffic = Some(340.0);
//!
//! let result = compare(&baseline, &rival, &CompareConfig::default()).unwrap();
//! assert_eq!(result.duration_diff_secs, -40.0);
//! assert!(result.geometry_diff_percent.abs() < 1e-6);
//! ```

use std::collections::HashMap;

use geo::{Line, LineString};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, RouteAnalysisError};

// Per-segment extras decoding and aggregation
pub mod extras;
pub use extras::{
    Criterion, CriterionSummary, DirectionalMean, ExtraInfo, RunLengthSegment, SummaryBucket,
};

// Pairwise divergence metrics
pub mod compare;
pub use compare::{compare, CompareConfig, ComparisonResult, MIN_GEOMETRY_POINTS};

// Batch analysis over paired routes
pub mod batch;
pub use batch::{BatchAnalyzer, ComparisonRow, RoutePairing};

// Routing-service payload models
pub mod responses;
pub use responses::{GoogleRoutePayload, OrsDirectionsResponse};

// ============================================================================
// Core Types
// ============================================================================

/// Normalized representation of one route.
///
/// Built once by a payload factory (see [`responses`]) and immutable
/// thereafter; all derived views (segments, expanded extras values) are
/// recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    /// Route identifier, carried into errors and result rows.
    pub route_id: String,
    /// Ordered (longitude, latitude) coordinates; at least two points for
    /// any route that reaches the comparator.
    pub geometry: LineString<f64>,
    /// Travel time in seconds, without traffic modeling.
    pub duration: f64,
    /// Travel time in seconds with traffic modeling; `None` for engines
    /// that do not model traffic.
    pub duration_in_traffic: Option<f64>,
    /// Route length in meters.
    pub distance: f64,
    /// Total climb in meters, when reported.
    pub ascent: Option<f64>,
    /// Total drop in meters, when reported.
    pub descent: Option<f64>,
    /// Departure hour tag, when the payload carried one.
    pub departure_hour: Option<String>,
    /// Per-criterion extras blocks; may be empty.
    pub extras: HashMap<Criterion, ExtraInfo>,
}

impl RouteRecord {
    /// Create a record with the required fields; optional fields start
    /// empty and can be set directly.
    pub fn new(
        route_id: impl Into<String>,
        geometry: LineString<f64>,
        duration: f64,
        distance: f64,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            geometry,
            duration,
            duration_in_traffic: None,
            distance,
            ascent: None,
            descent: None,
            departure_hour: None,
            extras: HashMap::new(),
        }
    }

    /// Number of geometry points.
    pub fn point_count(&self) -> usize {
        self.geometry.0.len()
    }

    /// Whether any extras criterion is attached.
    pub fn has_extras(&self) -> bool {
        !self.extras.is_empty()
    }

    /// Per-edge lines of the geometry, one per consecutive coordinate pair.
    pub fn segments(&self) -> Vec<Line<f64>> {
        self.geometry.lines().collect()
    }

    /// Expand a criterion's run-length-encoded block into one value per
    /// geometry edge, preserving vertex order.
    ///
    /// Each `(start, end, value)` triple contributes `value` repeated
    /// `end - start` times. For a block covering the full route the
    /// expansion has `point_count() - 1` entries.
    ///
    /// # Errors
    ///
    /// [`RouteAnalysisError::MissingData`] when the criterion is absent.
    pub fn values_for(&self, criterion: Criterion) -> Result<Vec<f64>> {
        let info = self
            .extras
            .get(&criterion)
            .ok_or_missing_data(&self.route_id, criterion)?;

        let mut values = Vec::new();
        for segment in &info.values {
            values.extend(std::iter::repeat(segment.value()).take(segment.run_length()));
        }
        Ok(values)
    }

    /// The bucketed summary distribution for a criterion.
    ///
    /// # Errors
    ///
    /// [`RouteAnalysisError::MissingData`] when the criterion is absent.
    pub fn summary_for(&self, criterion: Criterion) -> Result<CriterionSummary> {
        let info = self
            .extras
            .get(&criterion)
            .ok_or_missing_data(&self.route_id, criterion)?;

        Ok(CriterionSummary {
            criterion,
            buckets: info.summary.clone(),
        })
    }

    /// Distance-weighted uphill/downhill steepness means.
    ///
    /// A route without any downhill reports NaN on the negative side
    /// (and vice versa), never an error.
    pub fn steepness_exposure(&self) -> Result<DirectionalMean> {
        Ok(self.summary_for(Criterion::Steepness)?.weighted_average())
    }

    /// Distance-weighted mean noise exposure along the route.
    pub fn noise_exposure(&self) -> Result<f64> {
        Ok(self.summary_for(Criterion::Noise)?.weighted_mean())
    }
}
