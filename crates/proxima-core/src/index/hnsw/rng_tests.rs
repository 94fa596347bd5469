//! Tests for level assignment randomness.

use super::params::{HnswParams, MAX_LEVEL};
use super::rng::{LevelRng, Xorshift64};

#[test]
fn test_uniform_in_half_open_unit_interval() {
    let mut rng = Xorshift64::new();
    for _ in 0..10_000 {
        let u = rng.next_uniform();
        assert!(u > 0.0 && u <= 1.0, "uniform out of (0, 1]: {u}");
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = Xorshift64::seeded(42);
    let mut b = Xorshift64::seeded(42);
    for _ in 0..100 {
        assert!((a.next_uniform() - b.next_uniform()).abs() < f64::EPSILON);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Xorshift64::seeded(1);
    let mut b = Xorshift64::seeded(2);
    let diverged = (0..10).any(|_| (a.next_uniform() - b.next_uniform()).abs() > 1e-12);
    assert!(diverged);
}

#[test]
fn test_zero_seed_is_remapped() {
    let mut rng = Xorshift64::seeded(0);
    // An all-zero xorshift state would return 0 forever.
    assert!(rng.next_uniform() > 0.0);
}

#[test]
fn test_levels_respect_ceiling() {
    let mut rng = Xorshift64::seeded(7);
    let mult = HnswParams::level_multiplier();
    for _ in 0..10_000 {
        assert!(rng.next_level(mult, MAX_LEVEL) <= MAX_LEVEL);
    }
}

#[test]
fn test_level_distribution_decays_geometrically() {
    let mut rng = Xorshift64::seeded(123);
    let mult = HnswParams::level_multiplier();

    let n = 100_000;
    let mut counts = [0usize; MAX_LEVEL + 1];
    for _ in 0..n {
        counts[rng.next_level(mult, MAX_LEVEL)] += 1;
    }

    // With multiplier 1/ln(2), P(level = 0) = 0.5 and each layer above
    // halves again.
    #[allow(clippy::cast_precision_loss)]
    let p0 = counts[0] as f64 / n as f64;
    assert!((p0 - 0.5).abs() < 0.02, "P(level=0) should be ~0.5, got {p0}");

    #[allow(clippy::cast_precision_loss)]
    let p1 = counts[1] as f64 / n as f64;
    assert!((p1 - 0.25).abs() < 0.02, "P(level=1) should be ~0.25, got {p1}");

    // Deep levels must be rare
    assert!(counts[8..].iter().sum::<usize>() < n / 100);
}
