// RTT against egress queue length for packets of one source port

use crate::config::{resolve, ScatterSpec};
use crate::error::{AlignError, Result};
use crate::figure::{Figure, NamedSeries, SeriesKind};
use crate::record::{fields, Record};
use crate::reader;
use crate::transform::{BYTES_TO_KIB, NS_TO_US};
use crate::window::TimeWindow;
use std::path::Path;

/// `(qlen KiB, RTT µs)` for every record whose `sport` equals `sport`
///
/// Records lacking `RTT`, `qlen(0)` or `sport` are dropped. Input order is
/// kept; a scatter has no time axis to sort on.
pub fn rtt_qlen_points(records: &[Record], sport: u16) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.matches(fields::SPORT, f64::from(sport)))
        .filter_map(|r| r.require([fields::QLEN_PORT0, fields::RTT]).ok())
        .map(|[qlen, rtt]| (qlen * BYTES_TO_KIB, rtt * NS_TO_US))
        .collect()
}

/// Read a packet log and build the RTT/queue scatter figure
pub fn scatter_figure(spec: &ScatterSpec, base_dir: &Path) -> Result<Figure> {
    let window = match &spec.window {
        Some(w) => w.window()?,
        None => TimeWindow::unbounded(),
    };
    let path = resolve(base_dir, &spec.file);
    let batch = reader::read_records(reader::open(&path)?, &window)?;

    let points = rtt_qlen_points(&batch.records, spec.sport);
    if points.is_empty() {
        return Err(AlignError::EmptySeries(format!(
            "no RTT samples for sport {} in {}",
            spec.sport,
            path.display()
        )));
    }

    let mut figure = Figure::new(
        spec.id.clone(),
        "Node 0 Scatter Plot: RTT vs QueueLength",
        "Queue Length (KB)",
        "RTT (us)",
    );
    figure.push(NamedSeries::new(
        format!("sport {}", spec.sport),
        SeriesKind::Scatter,
        points,
    ));
    Ok(figure)
}
