//! Per-segment route attributes ("extras") and their aggregation.
//!
//! Routing services attach auxiliary data (noise level, greenness,
//! steepness) to routes as run-length-encoded segments plus a bucketed
//! summary. This module decodes both representations and computes
//! distance-weighted statistics over them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The recognized extras criteria.
///
/// Payload keys outside this set are ignored at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Proximity to green spaces (0-10 scale).
    Green,
    /// Traffic noise exposure (0-10 scale).
    Noise,
    /// Incline/decline classification (-5 to 5, negative = downhill).
    Steepness,
}

impl Criterion {
    /// All recognized criteria.
    pub const ALL: [Criterion; 3] = [Criterion::Green, Criterion::Noise, Criterion::Steepness];

    /// The payload key for this criterion.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Green => "green",
            Criterion::Noise => "noise",
            Criterion::Steepness => "steepness",
        }
    }

    /// Parse a payload key into a criterion, `None` if unrecognized.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "green" => Some(Criterion::Green),
            "noise" => Some(Criterion::Noise),
            "steepness" => Some(Criterion::Steepness),
            _ => None,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One run-length-encoded extras segment: `(start_vertex, end_vertex, value)`.
///
/// The triple states that `value` holds for every geometry edge from
/// `start_vertex` (inclusive) to `end_vertex` (exclusive). Serialized as a
/// plain three-element array, matching the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunLengthSegment(pub u32, pub u32, pub f64);

impl RunLengthSegment {
    pub fn start(&self) -> usize {
        self.0 as usize
    }

    pub fn end(&self) -> usize {
        self.1 as usize
    }

    pub fn value(&self) -> f64 {
        self.2
    }

    /// Number of edges this segment covers.
    pub fn run_length(&self) -> usize {
        self.end().saturating_sub(self.start())
    }
}

/// One bucket of a criterion's summary histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryBucket {
    /// The criterion value this bucket aggregates.
    pub value: f64,
    /// Route length carrying this value, in meters.
    pub distance: f64,
    /// Share of the total route length, in percent.
    #[serde(default)]
    pub amount: f64,
}

/// Raw extras block for one criterion, as delivered by the routing service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraInfo {
    /// Run-length-encoded values over geometry vertex ranges.
    #[serde(default)]
    pub values: Vec<RunLengthSegment>,
    /// Bucketed distribution of values along the route.
    #[serde(default)]
    pub summary: Vec<SummaryBucket>,
}

/// Weighted distribution of a single criterion along a route.
///
/// Derived on demand from a route's extras; not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionSummary {
    pub criterion: Criterion,
    /// Ordered buckets; weights (distances) are non-negative.
    pub buckets: Vec<SummaryBucket>,
}

/// Distance-weighted means of a criterion's non-negative and negative values.
///
/// Either side is NaN when the route has no exposure in that direction,
/// so a route that only climbs still yields a defined uphill mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectionalMean {
    /// Mean over buckets with `value >= 0`.
    pub positive: f64,
    /// Mean over buckets with `value < 0`.
    pub negative: f64,
}

impl CriterionSummary {
    /// Distance-weighted means, split by value sign.
    ///
    /// Each side computes `sum(value * distance) / sum(distance)` over its
    /// buckets. A side with zero total weight reports NaN rather than
    /// failing, which keeps entirely-uphill or entirely-downhill routes
    /// comparable on the other side.
    pub fn weighted_average(&self) -> DirectionalMean {
        let mut positive_sum = 0.0;
        let mut positive_weight = 0.0;
        let mut negative_sum = 0.0;
        let mut negative_weight = 0.0;

        for bucket in &self.buckets {
            if bucket.value >= 0.0 {
                positive_sum += bucket.value * bucket.distance;
                positive_weight += bucket.distance;
            } else {
                negative_sum += bucket.value * bucket.distance;
                negative_weight += bucket.distance;
            }
        }

        DirectionalMean {
            positive: mean_or_nan(positive_sum, positive_weight),
            negative: mean_or_nan(negative_sum, negative_weight),
        }
    }

    /// Distance-weighted mean over all buckets, sign ignored.
    ///
    /// NaN when the summary carries no weight at all.
    pub fn weighted_mean(&self) -> f64 {
        let mut sum = 0.0;
        let mut weight = 0.0;
        for bucket in &self.buckets {
            sum += bucket.value * bucket.distance;
            weight += bucket.distance;
        }
        mean_or_nan(sum, weight)
    }
}

fn mean_or_nan(sum: f64, weight: f64) -> f64 {
    if weight == 0.0 {
        f64::NAN
    } else {
        sum / weight
    }
}
