//! Step-function time series
//!
//! A `TimeSeries` holds strictly increasing timestamps with one value each and
//! is read as a right-continuous step function (the value holds until the next
//! observation). Timestamps and values are kept in parallel vectors so the
//! resampler can binary-search the timestamp slice directly.

use serde::Serialize;

/// A single observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub time: f64,
    pub value: f64,
}

/// Immutable sorted series of observations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from observations in any order
    ///
    /// Sorting is stable, so observations sharing a timestamp keep their input
    /// order; the last one wins and the earlier ones are dropped. Observations
    /// with a non-finite timestamp cannot be ordered and are discarded.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points: Vec<(f64, f64)> = points
            .into_iter()
            .filter(|(t, _)| t.is_finite())
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut times: Vec<f64> = Vec::with_capacity(points.len());
        let mut values: Vec<f64> = Vec::with_capacity(points.len());
        for (t, v) in points {
            if times.last() == Some(&t) {
                if let Some(last) = values.last_mut() {
                    *last = v;
                }
                continue;
            }
            times.push(t);
            values.push(v);
        }

        Self { times, values }
    }

    /// Build a series from already-sorted, duplicate-free parallel vectors
    ///
    /// Used by the resampler and transformer whose outputs are sorted by
    /// construction.
    pub(crate) fn from_sorted(times: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(times.windows(2).all(|w| w[0] < w[1]));
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first(&self) -> Option<Point> {
        self.get(0)
    }

    pub fn last(&self) -> Option<Point> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        Some(Point {
            time: *self.times.get(index)?,
            value: *self.values.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&time, &value)| Point { time, value })
    }

    /// Copy of this series with one more observation at the end
    ///
    /// `time` must be strictly after the current last timestamp.
    pub(crate) fn with_appended(&self, time: f64, value: f64) -> Self {
        debug_assert!(self.times.last().map_or(true, |&last| last < time));
        let mut times = Vec::with_capacity(self.len() + 1);
        let mut values = Vec::with_capacity(self.len() + 1);
        times.extend_from_slice(&self.times);
        values.extend_from_slice(&self.values);
        times.push(time);
        values.push(value);
        Self { times, values }
    }
}

impl FromIterator<(f64, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_sorts() {
        let series = TimeSeries::from_points(vec![(0.3, 3.0), (0.1, 1.0), (0.2, 2.0)]);
        assert_eq!(series.times(), &[0.1, 0.2, 0.3]);
        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_duplicate_timestamps_last_write_wins() {
        let series = TimeSeries::from_points(vec![(0.1, 1.0), (0.2, 2.0), (0.1, 7.0), (0.2, 9.0)]);
        assert_eq!(series.times(), &[0.1, 0.2]);
        assert_eq!(series.values(), &[7.0, 9.0]);
    }

    #[test]
    fn test_first_last_on_empty() {
        let series = TimeSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.first(), None);
        assert_eq!(series.last(), None);
    }

    #[test]
    fn test_first_last() {
        let series: TimeSeries = vec![(0.0, 10.0), (0.2, 20.0)].into_iter().collect();
        assert_eq!(
            series.first(),
            Some(Point {
                time: 0.0,
                value: 10.0
            })
        );
        assert_eq!(
            series.last(),
            Some(Point {
                time: 0.2,
                value: 20.0
            })
        );
    }

    #[test]
    fn test_with_appended_leaves_original_untouched() {
        let series = TimeSeries::from_points(vec![(0.05, 100.0)]);
        let extended = series.with_appended(0.15, 100.0);
        assert_eq!(series.len(), 1);
        assert_eq!(extended.times(), &[0.05, 0.15]);
    }

    #[test]
    fn test_iter_yields_points_in_order() {
        let series = TimeSeries::from_points(vec![(0.2, 2.0), (0.1, 1.0)]);
        let times: Vec<f64> = series.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0.1, 0.2]);
    }

    #[test]
    fn test_serializes_as_parallel_vectors() {
        // Series are only built through from_points, so the JSON form is output only
        let series = TimeSeries::from_points(vec![(0.2, 2.0), (0.1, 1.0), (0.1, 3.0)]);
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value["times"], serde_json::json!([0.1, 0.2]));
        assert_eq!(value["values"], serde_json::json!([3.0, 2.0]));
    }
}
