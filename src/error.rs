//! Unified error handling for route analysis.
//!
//! All fallible operations in this crate return [`Result`] with
//! [`RouteAnalysisError`]. Numerically degenerate inputs (zero
//! denominators in percent calculations) are *not* errors; they are
//! reported as NaN in the result fields.

use thiserror::Error;

use crate::extras::Criterion;

/// Result type alias for route analysis operations.
pub type Result<T> = std::result::Result<T, RouteAnalysisError>;

/// Errors that can occur during route analysis.
#[derive(Error, Debug)]
pub enum RouteAnalysisError {
    /// A requested extras criterion is absent from a route's payload.
    ///
    /// Recoverable: callers may treat this as "no exposure" for that
    /// criterion.
    #[error("route '{route_id}' has no '{criterion}' data in its extras")]
    MissingData {
        route_id: String,
        criterion: Criterion,
    },

    /// A route geometry has too few points to compare.
    ///
    /// Fatal for the affected comparison; the pair must be skipped.
    #[error(
        "route '{route_id}' has {point_count} points, at least {minimum_required} required for comparison"
    )]
    IncompatibleRoute {
        route_id: String,
        point_count: usize,
        minimum_required: usize,
    },

    /// A response payload was structurally invalid (e.g. a coordinate
    /// position with fewer than two elements).
    #[error("malformed response payload: {reason}")]
    MalformedPayload { reason: String },

    /// A response payload was not valid JSON for the expected schema.
    #[error("failed to parse response payload: {0}")]
    PayloadJson(#[from] serde_json::Error),
}

/// Extension trait for converting `Option` lookups into typed errors.
pub trait OptionExt<T> {
    /// Convert `None` into a [`RouteAnalysisError::MissingData`] error.
    fn ok_or_missing_data(self, route_id: &str, criterion: Criterion) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_data(self, route_id: &str, criterion: Criterion) -> Result<T> {
        self.ok_or_else(|| RouteAnalysisError::MissingData {
            route_id: route_id.to_string(),
            criterion,
        })
    }
}
