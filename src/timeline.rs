//! Common timeline construction
//!
//! Several step functions can only be compared pointwise once they are
//! evaluated on the same instants. The merged timeline is the union of every
//! observation time, so no discontinuity of any source is lost.

use crate::series::TimeSeries;
use crate::window::TimeWindow;
use serde::Serialize;

/// Sorted, duplicate-free evaluation grid spanning a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonTimeline {
    times: Vec<f64>,
}

impl CommonTimeline {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }
}

/// Merge the timestamps of `series` restricted to `window`
///
/// `window.start()` and `window.end()` are always present in the result, even
/// when no series observed them.
///
/// # Example
/// ```
/// use simtrace::{merge, TimeSeries, TimeWindow};
///
/// let a = TimeSeries::from_points(vec![(0.0, 10.0), (0.2, 20.0)]);
/// let b = TimeSeries::from_points(vec![(0.1, 5.0), (0.3, 15.0)]);
/// let window = TimeWindow::new(0.0, 0.3).unwrap();
///
/// let timeline = merge(&[&a, &b], &window);
/// assert_eq!(timeline.times(), &[0.0, 0.1, 0.2, 0.3]);
/// ```
pub fn merge(series: &[&TimeSeries], window: &TimeWindow) -> CommonTimeline {
    let capacity = series.iter().map(|s| s.len()).sum::<usize>() + 2;
    let mut times = Vec::with_capacity(capacity);

    times.push(window.start());
    times.push(window.end());
    for s in series {
        times.extend(s.times().iter().copied().filter(|&t| window.contains(t)));
    }

    times.sort_by(f64::total_cmp);
    times.dedup();

    tracing::debug!(
        sources = series.len(),
        points = times.len(),
        "merged common timeline"
    );

    CommonTimeline { times }
}
