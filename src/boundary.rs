//! Right-edge boundary extension
//!
//! Every source must still be "alive" at the end of the window before
//! merging. Left-edge coverage is handled by the resampler, which holds the
//! first value for earlier instants.

use crate::series::TimeSeries;
use crate::window::TimeWindow;

/// Synthesize an observation at `window.end()` if the series stops short
///
/// - last timestamp `< window.end()`: append `(window.end(), last value)`
/// - empty series: `[(window.end(), 0.0)]`
/// - otherwise the series is returned unchanged
///
/// ```
/// use simtrace::{extend, TimeSeries, TimeWindow};
///
/// let s = TimeSeries::from_points(vec![(0.05, 100.0)]);
/// let window = TimeWindow::new(0.0, 0.15).unwrap();
/// let extended = extend(&s, &window);
/// assert_eq!(extended.times(), &[0.05, 0.15]);
/// assert_eq!(extended.values(), &[100.0, 100.0]);
/// ```
pub fn extend(series: &TimeSeries, window: &TimeWindow) -> TimeSeries {
    match series.last() {
        None => {
            tracing::debug!(end = window.end(), "empty series extended with zero");
            TimeSeries::from_sorted(vec![window.end()], vec![0.0])
        }
        Some(last) if last.time < window.end() => series.with_appended(window.end(), last.value),
        Some(_) => series.clone(),
    }
}
