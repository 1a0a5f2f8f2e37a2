//! Unit conversion and pointwise differences

use crate::error::{AlignError, Result};
use crate::series::TimeSeries;
use serde::{Deserialize, Serialize};

/// Seconds to milliseconds
pub const SECONDS_TO_MS: f64 = 1_000.0;
/// Bytes to decimal kilobytes (`/ 1000`)
pub const BYTES_TO_KB: f64 = 1.0 / 1_000.0;
/// Bytes to binary kilobytes (`/ 1024`)
pub const BYTES_TO_KIB: f64 = 1.0 / 1_024.0;
/// Bits per second to gigabits per second
pub const BPS_TO_GBPS: f64 = 1.0 / 1.0e9;
/// Nanoseconds to microseconds
pub const NS_TO_US: f64 = 1.0 / 1_000.0;

/// Linear map applied to both axes of a series
///
/// `t' = (t - time_offset) * time_scale`, `v' = v * value_scale`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub time_offset: f64,
    pub time_scale: f64,
    pub value_scale: f64,
}

impl Default for Conversion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Conversion {
    pub fn identity() -> Self {
        Self {
            time_offset: 0.0,
            time_scale: 1.0,
            value_scale: 1.0,
        }
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_value_scale(mut self, scale: f64) -> Self {
        self.value_scale = scale;
        self
    }

    /// Shift the time origin (applied before scaling)
    pub fn with_time_offset(mut self, offset: f64) -> Self {
        self.time_offset = offset;
        self
    }

    pub fn time(&self, t: f64) -> f64 {
        (t - self.time_offset) * self.time_scale
    }

    pub fn value(&self, v: f64) -> f64 {
        v * self.value_scale
    }
}

/// Apply `conversion` to every observation of `series`
///
/// A positive time scale preserves order, so every observation is kept as is.
/// A non-positive scale reverses or collapses the axis and the result is
/// re-sorted through [`TimeSeries::from_points`].
pub fn convert(series: &TimeSeries, conversion: &Conversion) -> TimeSeries {
    let scale = conversion.time_scale;
    if !(scale > 0.0 && scale.is_finite()) {
        return series
            .iter()
            .map(|p| (conversion.time(p.time), conversion.value(p.value)))
            .collect();
    }

    let times: Vec<f64> = series.times().iter().map(|&t| conversion.time(t)).collect();
    let values: Vec<f64> = series.values().iter().map(|&v| conversion.value(v)).collect();

    // Float rounding can still map adjacent instants onto one value
    if times.windows(2).any(|w| w[0] >= w[1]) {
        tracing::warn!(
            points = times.len(),
            scale,
            "converted timestamps collide, keeping the last value per instant"
        );
        return TimeSeries::from_points(times.into_iter().zip(values));
    }

    TimeSeries::from_sorted(times, values)
}

/// Multiply every sample by `factor`
pub fn scale_values(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

/// Pointwise `b - a` over a shared timeline
///
/// Both operands must come from resampling onto the same
/// [`CommonTimeline`](crate::timeline::CommonTimeline).
///
/// # Errors
/// `TimelineMismatch` when lengths or timestamps differ. This is never
/// recovered: differencing misaligned series would silently corrupt the
/// output.
pub fn difference(a: &TimeSeries, b: &TimeSeries) -> Result<TimeSeries> {
    if let Some(index) = first_divergence(a.times(), b.times()) {
        return Err(AlignError::TimelineMismatch {
            left: a.len(),
            right: b.len(),
            index,
        });
    }

    let values = a
        .values()
        .iter()
        .zip(b.values())
        .map(|(va, vb)| vb - va)
        .collect();

    Ok(TimeSeries::from_sorted(a.times().to_vec(), values))
}

fn first_divergence(a: &[f64], b: &[f64]) -> Option<usize> {
    match a.iter().zip(b).position(|(x, y)| x != y) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(a.len().min(b.len())),
        None => None,
    }
}
