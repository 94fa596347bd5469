//! Distance metrics for vector dissimilarity.
//!
//! Both metrics are *dissimilarities*: lower is closer. Cosine is reported as
//! `1 - cos(a, b)`, which ranges from `0.0` (identical direction) to `2.0`
//! (opposite direction), so the index can order all results ascending
//! regardless of metric.

use crate::error::{Error, Result};
use crate::simd;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance metric used by an index, fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance. Best when vector magnitude matters.
    Euclidean,

    /// Cosine dissimilarity (`1 - cosine similarity`).
    /// Best for normalized text embeddings. Undefined for zero-norm vectors.
    Cosine,
}

impl DistanceMetric {
    /// Computes the dissimilarity between two vectors, validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the lengths differ, and
    /// [`Error::DegenerateVector`] if the metric is cosine and either vector
    /// has zero norm.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }
        self.check_vector(a)?;
        self.check_vector(b)?;
        Ok(self.calculate(a, b))
    }

    /// Computes the dissimilarity between two pre-validated vectors.
    ///
    /// This is the hot-path kernel used during graph traversal, where both
    /// vectors were validated when they entered the index.
    #[inline]
    #[must_use]
    pub(crate) fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Euclidean => simd::euclidean_distance(a, b),
            Self::Cosine => simd::cosine_distance(a, b),
        }
    }

    /// Rejects vectors this metric cannot handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateVector`] for zero-norm vectors under
    /// cosine, where the angle is undefined.
    pub(crate) fn check_vector(&self, v: &[f32]) -> Result<()> {
        if *self == Self::Cosine && simd::dot_product(v, v) == 0.0 {
            return Err(Error::DegenerateVector(
                "zero-norm vector has no direction under the cosine metric".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Cosine => write!(f, "cosine"),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = Error;

    /// Parses a metric name as received from a binding or configuration
    /// layer. Accepted names: `euclidean` (alias `l2`), `cosine`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "cosine" => Ok(Self::Cosine),
            other => Err(Error::InvalidArgument(format!(
                "unknown distance metric '{other}', expected 'euclidean' or 'cosine'"
            ))),
        }
    }
}
