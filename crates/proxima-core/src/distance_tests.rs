//! Tests for distance metrics.

use crate::distance::DistanceMetric;
use crate::error::Error;
use std::str::FromStr;

const EPS: f32 = 1e-5;

#[test]
fn test_euclidean_known_values() {
    let d = DistanceMetric::Euclidean
        .distance(&[0.0, 0.0], &[3.0, 4.0])
        .unwrap();
    assert!((d - 5.0).abs() < EPS);
}

#[test]
fn test_euclidean_zero_iff_equal() {
    let v = [1.5, -2.0, 0.25];
    let d = DistanceMetric::Euclidean.distance(&v, &v).unwrap();
    assert!(d.abs() < EPS);

    let d = DistanceMetric::Euclidean
        .distance(&v, &[1.5, -2.0, 0.26])
        .unwrap();
    assert!(d > 0.0);
}

#[test]
fn test_cosine_identical_direction() {
    let d = DistanceMetric::Cosine
        .distance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0])
        .unwrap();
    assert!(d.abs() < EPS, "parallel vectors should have distance 0, got {d}");
}

#[test]
fn test_cosine_opposite_direction() {
    let d = DistanceMetric::Cosine
        .distance(&[1.0, 0.0], &[-1.0, 0.0])
        .unwrap();
    assert!((d - 2.0).abs() < EPS);
}

#[test]
fn test_cosine_orthogonal() {
    let d = DistanceMetric::Cosine
        .distance(&[1.0, 0.0], &[0.0, 1.0])
        .unwrap();
    assert!((d - 1.0).abs() < EPS);
}

#[test]
fn test_dimension_mismatch() {
    let err = DistanceMetric::Euclidean
        .distance(&[1.0, 2.0], &[1.0, 2.0, 3.0])
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, actual: 3 }));
}

#[test]
fn test_cosine_zero_norm_is_degenerate() {
    let err = DistanceMetric::Cosine
        .distance(&[0.0, 0.0], &[1.0, 0.0])
        .unwrap_err();
    assert!(matches!(err, Error::DegenerateVector(_)));

    let err = DistanceMetric::Cosine
        .distance(&[1.0, 0.0], &[0.0, 0.0])
        .unwrap_err();
    assert!(matches!(err, Error::DegenerateVector(_)));
}

#[test]
fn test_euclidean_accepts_zero_vectors() {
    let d = DistanceMetric::Euclidean
        .distance(&[0.0, 0.0], &[0.0, 0.0])
        .unwrap();
    assert!(d.abs() < EPS);
}

#[test]
fn test_metric_from_str() {
    assert_eq!(
        DistanceMetric::from_str("euclidean").unwrap(),
        DistanceMetric::Euclidean
    );
    assert_eq!(
        DistanceMetric::from_str("l2").unwrap(),
        DistanceMetric::Euclidean
    );
    assert_eq!(
        DistanceMetric::from_str("Cosine").unwrap(),
        DistanceMetric::Cosine
    );

    let err = DistanceMetric::from_str("manhattan").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_metric_display_roundtrip() {
    for metric in [DistanceMetric::Euclidean, DistanceMetric::Cosine] {
        let parsed = DistanceMetric::from_str(&metric.to_string()).unwrap();
        assert_eq!(parsed, metric);
    }
}

#[test]
fn test_metric_serde() {
    let json = serde_json::to_string(&DistanceMetric::Cosine).unwrap();
    assert_eq!(json, "\"cosine\"");
    let metric: DistanceMetric = serde_json::from_str("\"euclidean\"").unwrap();
    assert_eq!(metric, DistanceMetric::Euclidean);
}
