//! Pairwise route comparison metrics.
//!
//! This module computes the divergence between a route from a
//! traffic-unaware engine (the *baseline*) and a route from a
//! traffic-aware engine between the same origin and destination:
//! duration and distance deltas, the share of the baseline geometry not
//! covered by the other route, and the Hausdorff distance between the
//! two geometries.
//!
//! The duration comparison is deliberately asymmetric: the baseline's
//! plain duration is held against the other route's traffic-adjusted
//! duration. Do not swap the argument roles.

use geo::{Densify, EuclideanDistance, EuclideanLength, HausdorffDistance, LineString, Point};
use serde::Serialize;

use crate::error::{Result, RouteAnalysisError};
use crate::RouteRecord;

/// Minimum number of geometry points for a route to be comparable.
pub const MIN_GEOMETRY_POINTS: usize = 2;

/// Configuration for geometry comparison.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Coincidence tolerance in coordinate units (degrees for WGS84).
    ///
    /// A piece of the baseline geometry counts as shared when it lies
    /// within this distance of the other geometry. Absorbs minor
    /// coordinate-precision mismatches between independently generated
    /// routes. Default: 0.0001 (roughly 10 m at mid latitudes).
    pub buffer_tolerance: f64,

    /// Densification step for the overlap measurement, in coordinate
    /// units. Must be positive. Default: half the buffer tolerance, so
    /// the classification error is bounded by one sub-segment.
    pub sample_spacing: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            buffer_tolerance: 1e-4,
            sample_spacing: 5e-5,
        }
    }
}

/// Divergence metrics between a baseline route and a traffic-aware route.
///
/// Percent fields are NaN when the corresponding baseline denominator is
/// zero; downstream consumers must filter NaN before aggregating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Baseline duration minus the other route's traffic-adjusted duration.
    pub duration_diff_secs: f64,
    /// Duration delta as a percentage of the baseline duration.
    pub duration_diff_percent: f64,
    /// Baseline distance minus the other route's distance.
    pub distance_diff_meters: f64,
    /// Distance delta as a percentage of the baseline distance.
    pub distance_diff_percent: f64,
    /// Share of the baseline's length not within tolerance of the other
    /// geometry, in percent.
    pub geometry_diff_percent: f64,
    /// Hausdorff distance between the two geometries, in coordinate units.
    pub geometry_diff_hausdorff: f64,
}

/// Compare a baseline route against a traffic-aware route.
///
/// `baseline` is the route from the traffic-unaware engine; its plain
/// duration and distance are the reference denominators for all percent
/// fields. `traffic_aware` contributes its `duration_in_traffic` to the
/// duration delta (falling back to its plain duration when the engine
/// supplied none).
///
/// Pure and deterministic: equal inputs always produce equal output.
///
/// # Errors
///
/// [`RouteAnalysisError::IncompatibleRoute`] when either geometry has
/// fewer than [`MIN_GEOMETRY_POINTS`] points.
///
/// # Example
/// ```
/// use geo::line_string;
/// use route_analyst::{compare, CompareConfig, RouteRecord};
///
/// let geometry = line_string![(x: 8.680, y: 49.410), (x: 8.690, y: 49.415)];
/// let baseline = RouteRecord::new("ors-1", geometry.clone(), 120.0, 1500.0);
/// let mut rival = RouteRecord::new("google-1", geometry, 100.0, 1500.0);
/// rival.duration_in_traffic = Some(140.0);
///
/// let result = compare(&baseline, &rival, &CompareConfig::default()).unwrap();
/// assert_eq!(result.duration_diff_secs, -20.0);
/// assert_eq!(result.distance_diff_meters, 0.0);
/// assert!(result.geometry_diff_percent.abs() < 1e-6);
/// ```
pub fn compare(
    baseline: &RouteRecord,
    traffic_aware: &RouteRecord,
    config: &CompareConfig,
) -> Result<ComparisonResult> {
    ensure_comparable(baseline)?;
    ensure_comparable(traffic_aware)?;

    let rival_duration = traffic_aware
        .duration_in_traffic
        .unwrap_or(traffic_aware.duration);
    let duration_diff_secs = baseline.duration - rival_duration;
    let distance_diff_meters = baseline.distance - traffic_aware.distance;

    Ok(ComparisonResult {
        duration_diff_secs,
        duration_diff_percent: percent_of(duration_diff_secs, baseline.duration),
        distance_diff_meters,
        distance_diff_percent: percent_of(distance_diff_meters, baseline.distance),
        geometry_diff_percent: geometry_divergence_percent(
            &baseline.geometry,
            &traffic_aware.geometry,
            config,
        ),
        geometry_diff_hausdorff: baseline
            .geometry
            .hausdorff_distance(&traffic_aware.geometry),
    })
}

fn ensure_comparable(route: &RouteRecord) -> Result<()> {
    let point_count = route.point_count();
    if point_count < MIN_GEOMETRY_POINTS {
        return Err(RouteAnalysisError::IncompatibleRoute {
            route_id: route.route_id.clone(),
            point_count,
            minimum_required: MIN_GEOMETRY_POINTS,
        });
    }
    Ok(())
}

/// Signed delta as a percentage of `whole`; NaN when `whole` is zero.
fn percent_of(diff: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        f64::NAN
    } else {
        diff / whole * 100.0
    }
}

/// Share of `baseline`'s length that does not run along `other`, in percent.
///
/// The baseline is densified at `config.sample_spacing` and each
/// sub-segment is classified by the distance from its midpoint to `other`:
/// within `config.buffer_tolerance` counts as shared. This measures the
/// same point set as intersecting the baseline with a buffer of that
/// radius around `other`, at the densification resolution.
///
/// Asymmetric by construction: extra excursions in `other` never increase
/// the result, while excursions in `baseline` do.
fn geometry_divergence_percent(
    baseline: &LineString<f64>,
    other: &LineString<f64>,
    config: &CompareConfig,
) -> f64 {
    let total = baseline.euclidean_length();
    if total == 0.0 {
        // Degenerate all-coincident geometry; same NaN policy as the
        // scalar percent fields.
        return f64::NAN;
    }

    let densified = baseline.densify(config.sample_spacing);
    let mut shared = 0.0;
    for segment in densified.lines() {
        let midpoint = Point::new(
            (segment.start.x + segment.end.x) / 2.0,
            (segment.start.y + segment.end.y) / 2.0,
        );
        if midpoint.euclidean_distance(other) <= config.buffer_tolerance {
            shared += segment.euclidean_length();
        }
    }

    // Float rounding can push `shared` a hair past `total`; clamp so a
    // perfect overlap reports exactly zero divergence.
    ((total - shared) / total * 100.0).max(0.0)
}
