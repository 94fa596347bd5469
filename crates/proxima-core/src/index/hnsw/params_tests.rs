//! Tests for HNSW parameters.

use super::params::{HnswParams, DEFAULT_EF_SEARCH, MAX_LEVEL};

#[test]
fn test_default_params() {
    let params = HnswParams::default();
    assert_eq!(params.m, 16);
    assert_eq!(params.ef_construction, 200);
}

#[test]
fn test_m0_is_double_m() {
    assert_eq!(HnswParams::default().m0(), 32);
    assert_eq!(HnswParams::custom(7, 100).m0(), 14);
}

#[test]
fn test_level_multiplier_is_inverse_ln2() {
    let mult = HnswParams::level_multiplier();
    assert!((mult - 1.442_695).abs() < 1e-5);
    // Expected population halves per layer: P(level >= 1) = 0.5
    assert!(((-0.5f64.ln()) * mult - 1.0).abs() < 1e-9);
}

#[test]
fn test_presets_ordering() {
    let fast = HnswParams::fast();
    let default = HnswParams::default();
    let high = HnswParams::high_recall();

    assert!(fast.m < default.m);
    assert!(default.m < high.m);
    assert!(fast.ef_construction < high.ef_construction);
}

#[test]
fn test_constants() {
    assert_eq!(MAX_LEVEL, 16);
    assert_eq!(DEFAULT_EF_SEARCH, 50);
}

#[test]
fn test_params_serde_roundtrip() {
    let params = HnswParams::custom(24, 300);
    let json = serde_json::to_string(&params).unwrap();
    let back: HnswParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}
