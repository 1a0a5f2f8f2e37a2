//! Forward-fill resampling
//!
//! Last-observation-carried-forward lookup over a sorted timestamp slice.
//! Before the first observation the first value is held (history is assumed
//! flat rather than zero); after the last observation the last value is held.

use crate::error::{AlignError, Result};
use crate::series::TimeSeries;
use crate::timeline::CommonTimeline;

/// Step-function lookup over parallel sorted slices
///
/// `times` must be sorted ascending and have the same length as `values`.
/// Returns `None` when either slice is empty or the lookup lands past the end
/// of a shorter `values`. O(log n).
///
/// ```
/// use simtrace::resample::forward_fill;
///
/// let times = [0.0, 0.2];
/// let values = ["a", "b"];
/// assert_eq!(forward_fill(&times, &values, -1.0), Some("a"));
/// assert_eq!(forward_fill(&times, &values, 0.1), Some("a"));
/// assert_eq!(forward_fill(&times, &values, 0.2), Some("b"));
/// assert_eq!(forward_fill(&times, &values, 9.0), Some("b"));
/// ```
pub fn forward_fill<V: Copy>(times: &[f64], values: &[V], t: f64) -> Option<V> {
    let first_time = *times.first()?;
    let last_time = *times.last()?;

    if t <= first_time {
        return values.first().copied();
    }
    if t >= last_time {
        return values.get(times.len() - 1).copied();
    }

    // Number of timestamps <= t; at least 1 unless t is NaN
    let idx = times.partition_point(|&x| x <= t);
    values.get(idx.saturating_sub(1)).copied()
}

/// Value of `series` at an arbitrary instant (`None` for an empty series)
pub fn value_at(series: &TimeSeries, t: f64) -> Option<f64> {
    forward_fill(series.times(), series.values(), t)
}

/// Project `series` onto every point of `timeline`
///
/// # Errors
/// `EmptySeries` when `series` has no observations. Extend series to the
/// window edge first (see [`crate::boundary::extend`]) to avoid this.
pub fn get_projection(series: &TimeSeries, timeline: &CommonTimeline) -> Result<TimeSeries> {
    if series.is_empty() {
        return Err(AlignError::EmptySeries(
            "cannot resample a series with no observations".to_string(),
        ));
    }

    let values = timeline
        .iter()
        .map(|t| value_at(series, t))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| AlignError::EmptySeries("series lost its observations".to_string()))?;

    Ok(TimeSeries::from_sorted(timeline.times().to_vec(), values))
}
