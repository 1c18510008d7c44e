//! Tests for the response payload models

use route_analyst::{
    Criterion, GoogleRoutePayload, OrsDirectionsResponse, RouteAnalysisError,
};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

const ORS_FIXTURE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [8.680, 49.410, 115.2],
                    [8.682, 49.411, 116.0],
                    [8.684, 49.412, 118.5],
                    [8.686, 49.413, 117.1]
                ]
            },
            "properties": {
                "summary": {"duration": 312.4, "distance": 1480.6},
                "ascent": 12.4,
                "descent": 3.1,
                "extras": {
                    "noise": {
                        "values": [[0, 2, 40.0], [2, 3, 45.0]],
                        "summary": [
                            {"value": 40.0, "distance": 990.0, "amount": 66.9},
                            {"value": 45.0, "distance": 490.6, "amount": 33.1}
                        ]
                    },
                    "steepness": {
                        "values": [[0, 3, -1.0]],
                        "summary": [
                            {"value": -1.0, "distance": 1480.6, "amount": 100.0}
                        ]
                    },
                    "surface": {
                        "values": [[0, 3, 3.0]],
                        "summary": [{"value": 3.0, "distance": 1480.6, "amount": 100.0}]
                    }
                }
            }
        }
    ]
}"#;

const GOOGLE_FIXTURE: &str = r#"{
    "id": "h8_12_0",
    "geometry": [[8.680, 49.410], [8.683, 49.4115], [8.686, 49.413]],
    "duration": 290.0,
    "duration_in_traffic": 355.0,
    "distance": 1462.0,
    "departure_time": "2020-06-15T08:00:00",
    "hour": "8"
}"#;

#[test]
fn test_ors_response_parses_into_record() {
    let response = OrsDirectionsResponse::from_json_str(ORS_FIXTURE).unwrap();
    let records = response.into_records("h8_12").unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.route_id, "h8_12");
    assert_eq!(record.point_count(), 4);
    assert!(approx_eq(record.duration, 312.4, 1e-9));
    assert!(approx_eq(record.distance, 1480.6, 1e-9));
    assert_eq!(record.duration_in_traffic, None);
    assert_eq!(record.ascent, Some(12.4));
    assert_eq!(record.descent, Some(3.1));

    // Elevation elements are dropped, lon/lat preserved
    assert!(approx_eq(record.geometry.0[0].x, 8.680, 1e-12));
    assert!(approx_eq(record.geometry.0[0].y, 49.410, 1e-12));
}

#[test]
fn test_ors_extras_are_typed_and_filtered() {
    let response = OrsDirectionsResponse::from_json_str(ORS_FIXTURE).unwrap();
    let records = response.into_records("h8_12").unwrap();
    let record = &records[0];

    let noise = record.values_for(Criterion::Noise).unwrap();
    assert_eq!(noise.len(), record.point_count() - 1);
    assert_eq!(noise, vec![40.0, 40.0, 45.0]);

    let steepness = record.steepness_exposure().unwrap();
    assert!(steepness.positive.is_nan());
    assert!(approx_eq(steepness.negative, -1.0, 1e-12));

    // "surface" is not a recognized criterion and is dropped at parse time
    assert_eq!(record.extras.len(), 2);
}

#[test]
fn test_ors_alternatives_get_suffixed_ids() {
    let mut value: serde_json::Value = serde_json::from_str(ORS_FIXTURE).unwrap();
    let feature = value["features"][0].clone();
    value["features"].as_array_mut().unwrap().push(feature);

    let response = OrsDirectionsResponse::from_value(value).unwrap();
    let records = response.into_records("h8_12").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].route_id, "h8_12");
    assert_eq!(records[1].route_id, "h8_12_alt1");
}

#[test]
fn test_google_payload_parses_into_record() {
    let payload = GoogleRoutePayload::from_json_str(GOOGLE_FIXTURE).unwrap();
    let record = payload.into_record().unwrap();

    assert_eq!(record.route_id, "h8_12_0");
    assert_eq!(record.point_count(), 3);
    assert_eq!(record.duration, 290.0);
    assert_eq!(record.duration_in_traffic, Some(355.0));
    assert_eq!(record.distance, 1462.0);
    assert_eq!(record.departure_hour.as_deref(), Some("8"));
    assert!(!record.has_extras());
}

#[test]
fn test_google_payload_without_traffic_duration() {
    let raw = r#"{
        "id": "h3_7_0",
        "geometry": [[8.680, 49.410], [8.686, 49.413]],
        "duration": 180.0,
        "distance": 900.0
    }"#;

    let record = GoogleRoutePayload::from_json_str(raw)
        .unwrap()
        .into_record()
        .unwrap();
    assert_eq!(record.duration_in_traffic, None);
    assert_eq!(record.departure_hour, None);
}

#[test]
fn test_short_coordinate_position_is_malformed() {
    let raw = r#"{
        "id": "broken",
        "geometry": [[8.680, 49.410], [8.686]],
        "duration": 180.0,
        "distance": 900.0
    }"#;

    let result = GoogleRoutePayload::from_json_str(raw).unwrap().into_record();
    assert!(matches!(
        result,
        Err(RouteAnalysisError::MalformedPayload { .. })
    ));
    assert!(result.unwrap_err().to_string().contains("broken"));
}

#[test]
fn test_invalid_json_is_a_payload_error() {
    let result = OrsDirectionsResponse::from_json_str("{not json");
    assert!(matches!(result, Err(RouteAnalysisError::PayloadJson(_))));

    // Missing required summary fields also fails at parse time
    let result = OrsDirectionsResponse::from_json_str(
        r#"{"features": [{"geometry": {"coordinates": []}, "properties": {}}]}"#,
    );
    assert!(matches!(result, Err(RouteAnalysisError::PayloadJson(_))));
}

#[test]
fn test_parsed_pair_compares_end_to_end() {
    use route_analyst::{compare, CompareConfig};

    let baseline = OrsDirectionsResponse::from_json_str(ORS_FIXTURE)
        .unwrap()
        .into_records("h8_12")
        .unwrap()
        .remove(0);
    let rival = GoogleRoutePayload::from_json_str(GOOGLE_FIXTURE)
        .unwrap()
        .into_record()
        .unwrap();

    let result = compare(&baseline, &rival, &CompareConfig::default()).unwrap();
    // 312.4 - 355.0
    assert!(approx_eq(result.duration_diff_secs, -42.6, 1e-9));
    assert!(approx_eq(result.distance_diff_meters, 18.6, 1e-9));
    assert!(result.geometry_diff_hausdorff >= 0.0);
}
