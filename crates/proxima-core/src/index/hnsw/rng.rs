//! Random level assignment for HNSW nodes.
//!
//! The level of each inserted node is drawn from a geometric distribution:
//! `level = floor(-ln(U) * level_multiplier)` with `U` uniform on `(0, 1]`.
//! The generator is injectable so tests can seed it (or script levels
//! outright) and reproduce exact graph shapes.

/// Source of randomness for level assignment.
///
/// Implementations live behind the index's write lock, so `next_uniform`
/// takes `&mut self` and needs no internal synchronization.
pub trait LevelRng: Send + Sync {
    /// Returns the next uniform draw on `(0, 1]`.
    fn next_uniform(&mut self) -> f64;

    /// Draws a node level from the geometric distribution, clamped to
    /// `max_level`.
    fn next_level(&mut self, level_multiplier: f64, max_level: usize) -> usize {
        let u = self.next_uniform();
        // -ln(u) >= 0 for u in (0, 1]; the `as` cast saturates, so even an
        // extreme draw lands on max_level after the clamp.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let level = (-u.ln() * level_multiplier).floor() as usize;
        level.min(max_level)
    }
}

/// Default xorshift64 generator.
///
/// Not cryptographic, but fast, allocation-free, and statistically adequate
/// for level assignment.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const DEFAULT_SEED: u64 = 0x5DEE_CE66_D1A4_B5B5;

    /// Creates a generator with the default seed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Self::DEFAULT_SEED,
        }
    }

    /// Creates a generator with an explicit seed. A zero seed is remapped
    /// since xorshift fixes the all-zero state.
    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::DEFAULT_SEED } else { seed },
        }
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRng for Xorshift64 {
    fn next_uniform(&mut self) -> f64 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.state = s;

        // Take the top 53 bits so the value is exactly representable, then
        // shift into (0, 1] so ln() is always defined.
        #[allow(clippy::cast_precision_loss)]
        let mantissa = (s >> 11) as f64;
        (mantissa + 1.0) / 9_007_199_254_740_992.0
    }
}
