// Buffer-occupancy distribution of switch queue logs
//
// Buffer logs have a fixed layout (`switch 0 qlen 512 time 0.0007`), so the
// queue length is taken by column index rather than by key.

use crate::cdf::{cdf, EmpiricalDistribution};
use crate::config::{resolve, CdfInput, CdfSpec};
use crate::error::Result;
use crate::figure::{Figure, NamedSeries};
use crate::reader;
use crate::transform::scale_values;
use std::path::Path;

/// Empirical CDF of queue-length samples converted with `kilo_factor`
pub fn occupancy_cdf(samples_bytes: &[f64], kilo_factor: f64) -> Result<EmpiricalDistribution> {
    cdf(&scale_values(samples_bytes, kilo_factor))
}

/// Read one buffer log of a CDF group
pub fn input_cdf(spec: &CdfSpec, input: &CdfInput, base_dir: &Path) -> Result<NamedSeries> {
    let path = resolve(base_dir, &input.path);
    let samples = reader::read_column_file(&path, spec.column, spec.min_tokens)?;
    let dist = occupancy_cdf(&samples, spec.unit_base.kilo_factor())?;

    tracing::debug!(
        label = %input.label,
        samples = dist.len(),
        median = dist.quantile(0.5),
        p99 = dist.quantile(0.99),
        "buffer occupancy distribution"
    );

    Ok(NamedSeries::from_cdf(input.label.clone(), &dist))
}

/// Empty figure carrying the labels and limits of a CDF group
pub fn cdf_figure(spec: &CdfSpec) -> Figure {
    Figure::new(
        spec.id.clone(),
        "Buffer Occupancy CDF",
        "Buffer Occupancy (KB)",
        "CDF",
    )
    .with_x_limits(spec.x_limits)
    .with_y_limits(spec.y_limits)
}
