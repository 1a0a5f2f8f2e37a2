//! Empirical cumulative distribution
//!
//! Strict order-statistic definition: the i-th smallest of N samples
//! (1-indexed) has probability `i / N`. Tied samples get successive ranks
//! rather than a shared averaged rank, so probabilities are strictly
//! increasing and the last one is exactly 1.0.

use crate::error::{AlignError, Result};
use serde::Serialize;

/// One step of the empirical CDF
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    pub value: f64,
    pub probability: f64,
}

/// Sorted samples paired with their cumulative probabilities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpiricalDistribution {
    points: Vec<CdfPoint>,
}

impl EmpiricalDistribution {
    pub fn points(&self) -> &[CdfPoint] {
        &self.points
    }

    /// Number of samples (never zero)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0].value
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1].value
    }

    /// Fraction of samples `<= x` (0.0 below the smallest sample)
    pub fn probability_at(&self, x: f64) -> f64 {
        let count = self.points.partition_point(|p| p.value <= x);
        count as f64 / self.points.len() as f64
    }

    /// Smallest sample whose cumulative probability is at least `p`
    ///
    /// `p` is clamped to `[0, 1]`; `quantile(0.0)` is the minimum.
    pub fn quantile(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        let idx = self.points.partition_point(|point| point.probability < p);
        self.points[idx.min(self.points.len() - 1)].value
    }
}

/// Build the empirical CDF of `samples`
///
/// # Errors
/// `EmptySeries` when `samples` is empty; an empty distribution is undefined.
///
/// ```
/// use simtrace::cdf;
///
/// let dist = cdf(&[30.0, 10.0, 20.0]).unwrap();
/// let values: Vec<f64> = dist.points().iter().map(|p| p.value).collect();
/// assert_eq!(values, vec![10.0, 20.0, 30.0]);
/// assert_eq!(dist.points()[2].probability, 1.0);
/// ```
pub fn cdf(samples: &[f64]) -> Result<EmpiricalDistribution> {
    if samples.is_empty() {
        return Err(AlignError::EmptySeries(
            "cannot build a CDF from zero samples".to_string(),
        ));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let points = sorted
        .into_iter()
        .enumerate()
        .map(|(i, value)| CdfPoint {
            value,
            probability: (i + 1) as f64 / n,
        })
        .collect();

    Ok(EmpiricalDistribution { points })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdf_worked_example() {
        let dist = cdf(&[30.0, 10.0, 20.0]).unwrap();
        let values: Vec<f64> = dist.points().iter().map(|p| p.value).collect();
        let probs: Vec<f64> = dist.points().iter().map(|p| p.probability).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
        assert_eq!(probs, vec![1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_cdf_ties_get_distinct_ranks() {
        let dist = cdf(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        let probs: Vec<f64> = dist.points().iter().map(|p| p.probability).collect();
        assert_eq!(probs, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_cdf_empty_is_error() {
        assert!(matches!(cdf(&[]), Err(AlignError::EmptySeries(_))));
    }

    #[test]
    fn test_cdf_single_sample() {
        let dist = cdf(&[42.0]).unwrap();
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.points()[0].probability, 1.0);
        assert_eq!(dist.min(), 42.0);
        assert_eq!(dist.max(), 42.0);
    }

    #[test]
    fn test_probability_at() {
        let dist = cdf(&[10.0, 20.0, 20.0, 40.0]).unwrap();
        assert_eq!(dist.probability_at(5.0), 0.0);
        assert_eq!(dist.probability_at(10.0), 0.25);
        assert_eq!(dist.probability_at(20.0), 0.75);
        assert_eq!(dist.probability_at(39.9), 0.75);
        assert_eq!(dist.probability_at(40.0), 1.0);
        assert_eq!(dist.probability_at(1e9), 1.0);
    }

    #[test]
    fn test_quantile() {
        let dist = cdf(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(dist.quantile(0.0), 1.0);
        assert_eq!(dist.quantile(0.25), 1.0);
        assert_eq!(dist.quantile(0.5), 2.0);
        assert_eq!(dist.quantile(0.51), 3.0);
        assert_eq!(dist.quantile(1.0), 4.0);
        assert_eq!(dist.quantile(7.0), 4.0);
    }
}
