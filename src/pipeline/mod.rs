//! Analysis pipelines for the simulator's evaluation logs
//!
//! Each pipeline has a pure core operating on in-memory series or records,
//! and a thin per-unit wrapper that reads one log (or one metric's pair of
//! logs). The batch runner calls the wrappers and decides which failures to
//! skip.

mod buffer_cdf;
mod burst_diff;
mod scatter;
mod workload;

pub use buffer_cdf::{cdf_figure, input_cdf, occupancy_cdf};
pub use burst_diff::{burst_difference, burst_figure, metric_difference};
pub use scatter::{rtt_qlen_points, scatter_figure};
pub use workload::{workload_figure, workload_series, WorkloadSeries};
