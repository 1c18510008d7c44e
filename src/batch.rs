//! Batch comparison of paired routes.
//!
//! [`BatchAnalyzer`] walks a sequence of route pairings, compares each
//! baseline against its traffic-aware counterpart and assembles flat,
//! serializable rows for tabular export. Partial data availability is
//! expected: pairings without a traffic-aware route, or with a geometry
//! too short to compare, are skipped with a logged notice instead of
//! failing the batch.

use log::{info, warn};
use serde::Serialize;

use crate::compare::{compare, CompareConfig, ComparisonResult};
use crate::RouteRecord;

/// One unit of work for the batch analyzer.
#[derive(Debug, Clone)]
pub struct RoutePairing {
    /// Identifier shared by both routes (origin/destination/departure key).
    pub route_id: String,
    /// Provenance tag: which routing configuration produced the baseline
    /// (e.g. "normal", "modelled_p85").
    pub profile: String,
    /// Route from the traffic-unaware engine.
    pub baseline: RouteRecord,
    /// Route from the traffic-aware engine, when one was available.
    pub traffic_aware: Option<RouteRecord>,
}

/// One flattened result row, ready for tabular export.
///
/// The divergence metrics are flattened into the top level on
/// serialization, so a CSV/GeoJSON sink sees a single flat record.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub route_id: String,
    pub profile: String,
    /// Departure hour of the traffic-aware route, when known.
    pub hour: Option<String>,
    pub baseline_duration_secs: f64,
    pub baseline_distance_meters: f64,
    pub traffic_aware_duration_secs: f64,
    pub traffic_aware_duration_in_traffic_secs: Option<f64>,
    pub traffic_aware_distance_meters: f64,
    #[serde(flatten)]
    pub metrics: ComparisonResult,
}

/// Runs [`compare`] over a collection of pairings.
#[derive(Debug, Clone, Default)]
pub struct BatchAnalyzer {
    config: CompareConfig,
}

impl BatchAnalyzer {
    /// Create an analyzer with the given comparison configuration.
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    /// Analyze pairings sequentially.
    ///
    /// Output order follows input order. Pairings that cannot be compared
    /// (missing traffic-aware route, incompatible geometry) are skipped
    /// with a `warn!` notice.
    pub fn analyze(&self, pairings: impl IntoIterator<Item = RoutePairing>) -> Vec<ComparisonRow> {
        let mut rows = Vec::new();
        for pairing in pairings {
            if let Some(row) = self.analyze_pairing(pairing) {
                rows.push(row);
            }
        }
        info!("batch analysis produced {} rows", rows.len());
        rows
    }

    /// Analyze pairings in parallel using rayon.
    ///
    /// Same skip semantics as [`BatchAnalyzer::analyze`]; output order
    /// still follows input order.
    #[cfg(feature = "parallel")]
    pub fn analyze_parallel(&self, pairings: Vec<RoutePairing>) -> Vec<ComparisonRow> {
        use rayon::prelude::*;

        let rows: Vec<ComparisonRow> = pairings
            .into_par_iter()
            .filter_map(|pairing| self.analyze_pairing(pairing))
            .collect();
        info!("parallel batch analysis produced {} rows", rows.len());
        rows
    }

    fn analyze_pairing(&self, pairing: RoutePairing) -> Option<ComparisonRow> {
        let RoutePairing {
            route_id,
            profile,
            baseline,
            traffic_aware,
        } = pairing;

        let traffic_aware = match traffic_aware {
            Some(route) => route,
            None => {
                warn!(
                    "route '{}' ({}): no traffic-aware route available, skipping",
                    route_id, profile
                );
                return None;
            }
        };

        match compare(&baseline, &traffic_aware, &self.config) {
            Ok(metrics) => Some(ComparisonRow {
                hour: traffic_aware.departure_hour.clone(),
                baseline_duration_secs: baseline.duration,
                baseline_distance_meters: baseline.distance,
                traffic_aware_duration_secs: traffic_aware.duration,
                traffic_aware_duration_in_traffic_secs: traffic_aware.duration_in_traffic,
                traffic_aware_distance_meters: traffic_aware.distance,
                route_id,
                profile,
                metrics,
            }),
            Err(err) => {
                warn!("route '{}' ({}): {}, skipping", route_id, profile, err);
                None
            }
        }
    }
}
