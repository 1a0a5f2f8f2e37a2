// Throughput and queue length of one sender around an incast event
//
// Time is reported in ms relative to the window start, throughput in Gbit/s
// and queue length in KiB.

use crate::config::{resolve, WorkloadSpec};
use crate::error::{AlignError, Result};
use crate::figure::{Axis, Figure, NamedSeries, SeriesKind};
use crate::record::{fields, Record};
use crate::reader;
use crate::series::TimeSeries;
use crate::transform::{convert, Conversion, BPS_TO_GBPS, BYTES_TO_KIB, SECONDS_TO_MS};
use crate::window::TimeWindow;
use std::path::Path;

/// Converted throughput and queue-length series sharing one time base
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSeries {
    pub throughput_gbps: TimeSeries,
    pub qlen_kib: TimeSeries,
}

/// Build the workload series from already-windowed records
///
/// Records missing `throughput` or `qlen` are dropped.
///
/// # Errors
/// `EmptySeries` if no record carries both fields.
pub fn workload_series(records: &[Record], window: &TimeWindow) -> Result<WorkloadSeries> {
    let mut throughput = Vec::with_capacity(records.len());
    let mut qlen = Vec::with_capacity(records.len());

    for rec in records.iter().filter(|r| window.contains(r.time())) {
        let Ok([tput, q]) = rec.require([fields::THROUGHPUT, fields::QLEN]) else {
            continue;
        };
        throughput.push((rec.time(), tput));
        qlen.push((rec.time(), q));
    }

    if throughput.is_empty() {
        return Err(AlignError::EmptySeries(format!(
            "no throughput/qlen records in [{}, {}]",
            window.start(),
            window.end()
        )));
    }

    let relative_ms = Conversion::identity()
        .with_time_offset(window.start())
        .with_time_scale(SECONDS_TO_MS);

    Ok(WorkloadSeries {
        throughput_gbps: convert(
            &TimeSeries::from_points(throughput),
            &relative_ms.with_value_scale(BPS_TO_GBPS),
        ),
        qlen_kib: convert(
            &TimeSeries::from_points(qlen),
            &relative_ms.with_value_scale(BYTES_TO_KIB),
        ),
    })
}

/// Read one log and build its throughput/qlen figure
pub fn workload_figure(spec: &WorkloadSpec, file: &str, base_dir: &Path) -> Result<Figure> {
    let window = spec.window.window()?;
    let path = resolve(base_dir, file);
    let batch = reader::read_records(reader::open(&path)?, &window)?;
    let series = workload_series(&batch.records, &window)?;

    let span_ms = window.duration() * SECONDS_TO_MS;

    let mut figure = Figure::new(
        WorkloadSpec::figure_id(file),
        format!("Throughput & Qlen vs. Time (Normalized)\n{}", file),
        format!(
            "Time (ms) [{}s => 0ms, {}s => {}ms]",
            window.start(),
            window.end(),
            span_ms.round()
        ),
        "Throughput (Gbps)",
    )
    .with_y2_label("Qlen (KB)")
    .with_x_limits(Some((0.0, span_ms)))
    .with_y_limits(spec.throughput_limits)
    .with_y2_limits(spec.qlen_limits);

    figure.push(NamedSeries::from_series(
        "Throughput (Gbps)",
        SeriesKind::Line,
        &series.throughput_gbps,
    ));
    figure.push(
        NamedSeries::from_series("Qlen (KB)", SeriesKind::Line, &series.qlen_kib)
            .on_axis(Axis::Secondary),
    );

    Ok(figure)
}
