//! Tests for the RouteRecord core type

use std::collections::HashMap;

use geo::LineString;
use route_analyst::{Criterion, ExtraInfo, RouteAnalysisError, RouteRecord, RunLengthSegment};

fn sample_geometry() -> LineString<f64> {
    LineString::from(vec![
        (8.680, 49.410),
        (8.682, 49.411),
        (8.684, 49.412),
        (8.686, 49.413),
        (8.688, 49.414),
        (8.690, 49.415),
    ])
}

fn sample_record() -> RouteRecord {
    let mut extras = HashMap::new();
    extras.insert(
        Criterion::Noise,
        ExtraInfo {
            values: vec![
                RunLengthSegment(0, 3, 40.0),
                RunLengthSegment(3, 5, 45.0),
            ],
            summary: Vec::new(),
        },
    );

    let mut record = RouteRecord::new("test-route", sample_geometry(), 300.0, 1250.0);
    record.extras = extras;
    record
}

#[test]
fn test_values_for_expands_run_lengths() {
    let record = sample_record();
    let values = record.values_for(Criterion::Noise).unwrap();

    // The block covers the full route: one value per edge
    assert_eq!(values.len(), record.point_count() - 1);
    assert_eq!(values, vec![40.0, 40.0, 40.0, 45.0, 45.0]);
}

#[test]
fn test_values_for_preserves_segment_order() {
    let mut record = sample_record();
    record.extras.insert(
        Criterion::Steepness,
        ExtraInfo {
            values: vec![
                RunLengthSegment(0, 1, -2.0),
                RunLengthSegment(1, 4, 0.0),
                RunLengthSegment(4, 5, 3.0),
            ],
            summary: Vec::new(),
        },
    );

    let values = record.values_for(Criterion::Steepness).unwrap();
    assert_eq!(values, vec![-2.0, 0.0, 0.0, 0.0, 3.0]);
}

#[test]
fn test_values_for_missing_criterion_fails() {
    let record = sample_record();
    let result = record.values_for(Criterion::Green);

    assert!(matches!(
        result,
        Err(RouteAnalysisError::MissingData { .. })
    ));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("test-route"));
    assert!(err.to_string().contains("green"));
}

#[test]
fn test_summary_for_missing_criterion_fails() {
    let record = sample_record();
    assert!(matches!(
        record.summary_for(Criterion::Steepness),
        Err(RouteAnalysisError::MissingData { .. })
    ));
}

#[test]
fn test_segments_one_per_coordinate_pair() {
    let record = sample_record();
    let segments = record.segments();

    assert_eq!(segments.len(), record.point_count() - 1);
    assert_eq!(segments[0].start, record.geometry.0[0]);
    assert_eq!(
        segments.last().unwrap().end,
        *record.geometry.0.last().unwrap()
    );
    // Segments chain without gaps
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn test_record_without_extras() {
    let record = RouteRecord::new("bare", sample_geometry(), 100.0, 500.0);
    assert!(!record.has_extras());
    assert!(record.values_for(Criterion::Noise).is_err());
}

#[test]
fn test_exposure_accessors() {
    use route_analyst::SummaryBucket;

    let mut record = sample_record();
    record.extras.insert(
        Criterion::Steepness,
        ExtraInfo {
            values: Vec::new(),
            summary: vec![
                SummaryBucket {
                    value: 2.0,
                    distance: 400.0,
                    amount: 32.0,
                },
                SummaryBucket {
                    value: -1.0,
                    distance: 850.0,
                    amount: 68.0,
                },
            ],
        },
    );
    record.extras.get_mut(&Criterion::Noise).unwrap().summary = vec![SummaryBucket {
        value: 40.0,
        distance: 1250.0,
        amount: 100.0,
    }];

    let steepness = record.steepness_exposure().unwrap();
    assert_eq!(steepness.positive, 2.0);
    assert_eq!(steepness.negative, -1.0);

    assert_eq!(record.noise_exposure().unwrap(), 40.0);
}
