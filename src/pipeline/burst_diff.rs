// Difference of a cumulative byte counter between two experimental conditions
//
// Both logs are extended to the window end, merged onto one timeline,
// forward-filled, converted (s -> ms, bytes -> KB) and subtracted
// (treatment - baseline) point by point.

use crate::boundary::extend;
use crate::config::{resolve, BurstDiffSpec, UnitBase};
use crate::error::{AlignError, Result};
use crate::figure::{Figure, NamedSeries, SeriesKind};
use crate::reader;
use crate::resample::get_projection;
use crate::series::TimeSeries;
use crate::timeline::merge;
use crate::transform::{convert, difference, Conversion, SECONDS_TO_MS};
use crate::window::TimeWindow;
use std::io;
use std::path::Path;

/// `treatment - baseline` on the merged timeline of both series
///
/// Timestamps of the result are in milliseconds, values are the raw
/// difference multiplied by `value_scale`.
pub fn burst_difference(
    baseline: &TimeSeries,
    treatment: &TimeSeries,
    window: &TimeWindow,
    value_scale: f64,
) -> Result<TimeSeries> {
    let baseline = extend(baseline, window);
    let treatment = extend(treatment, window);

    let timeline = merge(&[&baseline, &treatment], window);
    let baseline = get_projection(&baseline, &timeline)?;
    let treatment = get_projection(&treatment, &timeline)?;

    let conversion = Conversion::identity()
        .with_time_scale(SECONDS_TO_MS)
        .with_value_scale(value_scale);

    difference(
        &convert(&baseline, &conversion),
        &convert(&treatment, &conversion),
    )
}

/// Read both logs of one metric and difference them
pub fn metric_difference(
    spec: &BurstDiffSpec,
    metric: &str,
    base_dir: &Path,
) -> Result<NamedSeries> {
    let window = spec.window.window()?;
    let baseline_path = resolve(base_dir, &spec.baseline_path(metric));
    let treatment_path = resolve(base_dir, &spec.treatment_path(metric));

    let baseline = read_condition(&baseline_path, &spec.field, &window, metric)?;
    let treatment = read_condition(&treatment_path, &spec.field, &window, metric)?;

    if baseline.is_empty() && treatment.is_empty() {
        tracing::warn!(
            metric,
            baseline = %baseline_path.display(),
            treatment = %treatment_path.display(),
            "no samples in window for either condition, difference is flat zero"
        );
    }

    let diff = burst_difference(&baseline, &treatment, &window, spec.unit_base.kilo_factor())?;

    Ok(NamedSeries::from_series(
        format!(
            "{} ({} - {})",
            metric, spec.treatment_label, spec.baseline_label
        ),
        SeriesKind::Step,
        &diff,
    ))
}

/// Read one condition's counter; an absent log is an empty series
///
/// The window is known here, so [`extend`] later reduces an empty series to a
/// single `(window.end, 0)` observation instead of dropping the metric.
fn read_condition(
    path: &Path,
    field: &str,
    window: &TimeWindow,
    metric: &str,
) -> Result<TimeSeries> {
    match reader::read_series(path, field, window) {
        Err(AlignError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                metric,
                path = %path.display(),
                "log absent, series reduced to the window end boundary"
            );
            Ok(TimeSeries::new())
        }
        other => other,
    }
}

/// Empty figure carrying the labels of a burst difference job
pub fn burst_figure(spec: &BurstDiffSpec) -> Figure {
    let title = spec.title.clone().unwrap_or_else(|| {
        format!(
            "Difference ({} - {}) for {}",
            spec.treatment_label,
            spec.baseline_label,
            spec.metrics.join(", ")
        )
    });
    let unit = match spec.unit_base {
        UnitBase::Decimal => "KB",
        UnitBase::Binary => "KiB",
    };
    Figure::new(
        spec.id.clone(),
        title,
        "Time (ms)",
        format!("Difference in {} ({})", spec.field, unit),
    )
}
