//! Distance metrics.

use crate::error::{BiblioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance function used by an index.
///
/// Mismatched vector lengths always yield `f64::INFINITY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line (L2) distance
    #[default]
    Euclidean,
    /// 1 - cosine similarity, in [0, 2]
    Cosine,
}

impl Metric {
    /// Distance between `a` and `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibliorec::index::Metric;
    ///
    /// assert!((Metric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
    /// assert!((Metric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            return f64::INFINITY;
        }
        match self {
            Metric::Euclidean => euclidean(a, b),
            Metric::Cosine => cosine(a, b),
        }
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Compute cosine distance (1 - cosine similarity).
///
/// Returns values in [0, 2]:
/// - 0: identical direction
/// - 1: orthogonal
/// - 2: opposite direction
///
/// A zero vector has no direction, so its distance to anything is infinite.
fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return f64::INFINITY;
    }

    let cos_sim = dot / (norm_a * norm_b);
    1.0 - cos_sim.clamp(-1.0, 1.0)
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::Cosine => write!(f, "cosine"),
        }
    }
}

impl FromStr for Metric {
    type Err = BiblioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "cosine" => Ok(Metric::Cosine),
            other => Err(BiblioError::invalid_config(
                "metric",
                other,
                "euclidean or cosine",
            )),
        }
    }
}
