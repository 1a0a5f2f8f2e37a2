//! Batch execution of an experiment config
//!
//! Every metric, file and CDF input is an independent unit of work. A unit
//! that fails with a recoverable error is logged and recorded in the
//! [`BatchReport`]; any other error aborts the whole batch.

use crate::config::ExperimentConfig;
use crate::error::{AlignError, Result};
use crate::figure::Figure;
use crate::pipeline;
use serde::Serialize;
use std::path::Path;

/// A unit of work that produced no output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedUnit {
    /// Id of the job the unit belongs to
    pub job: String,
    /// Metric name, log file or CDF label
    pub unit: String,
    pub reason: String,
}

/// Figures produced by a batch run plus the units that were skipped
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub figures: Vec<Figure>,
    pub skipped: Vec<SkippedUnit>,
}

impl BatchReport {
    fn skip(&mut self, job: &str, unit: &str, err: AlignError) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err);
        }
        tracing::warn!(job, unit, error = %err, "skipping unit");
        self.skipped.push(SkippedUnit {
            job: job.to_string(),
            unit: unit.to_string(),
            reason: err.to_string(),
        });
        Ok(())
    }

    fn produce(&mut self, figure: Figure) {
        tracing::info!(
            id = %figure.id,
            series = figure.series.len(),
            points = figure.total_points(),
            "figure produced"
        );
        self.figures.push(figure);
    }
}

/// Run every job of `config`, resolving relative paths against `base_dir`
///
/// # Errors
/// The first non-recoverable error (`TimelineMismatch`, `InvalidWindow`,
/// `Config`) met by any unit.
pub fn run(config: &ExperimentConfig, base_dir: &Path) -> Result<BatchReport> {
    config.validate()?;
    let mut report = BatchReport::default();

    for spec in &config.burst_diff {
        let mut figure = pipeline::burst_figure(spec);
        for metric in &spec.metrics {
            match pipeline::metric_difference(spec, metric, base_dir) {
                Ok(series) => figure.push(series),
                Err(e) => report.skip(&spec.id, metric, e)?,
            }
        }
        if figure.series.is_empty() {
            tracing::warn!(job = %spec.id, "no metric produced a difference, figure dropped");
        } else {
            report.produce(figure);
        }
    }

    for spec in &config.workload {
        for file in &spec.files {
            match pipeline::workload_figure(spec, file, base_dir) {
                Ok(figure) => report.produce(figure),
                Err(e) => report.skip("workload", file, e)?,
            }
        }
    }

    for spec in &config.scatter {
        match pipeline::scatter_figure(spec, base_dir) {
            Ok(figure) => report.produce(figure),
            Err(e) => report.skip(&spec.id, &spec.file, e)?,
        }
    }

    for spec in &config.cdf {
        let mut figure = pipeline::cdf_figure(spec);
        for input in &spec.inputs {
            match pipeline::input_cdf(spec, input, base_dir) {
                Ok(series) => figure.push(series),
                Err(e) => report.skip(&spec.id, &input.label, e)?,
            }
        }
        if figure.series.is_empty() {
            tracing::warn!(job = %spec.id, "no buffer log produced a distribution, figure dropped");
        } else {
            report.produce(figure);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[[burst_diff]]
id = "burst"
window = { start = 0.0, end = 0.3 }
metrics = ["hpcc", "dcqcn"]
baseline = "prob0/result-{metric}.burst"
treatment = "prob100/result-{metric}.burst"

[[workload]]
window = { start = 0.149, end = 0.154 }
files = ["result-hpcc.burst", "missing.burst"]

[[cdf]]
id = "cdf"
inputs = [
    { label = "HPCC", path = "hpcc.buf" },
    { label = "Missing", path = "missing.buf" },
]
"#;

    fn write_fixture(dir: &Path) {
        fs::create_dir_all(dir.join("prob0")).unwrap();
        fs::create_dir_all(dir.join("prob100")).unwrap();
        fs::write(
            dir.join("prob0/result-hpcc.burst"),
            "time 0.0 totalTxByte 10000\ntime 0.2 totalTxByte 20000\n",
        )
        .unwrap();
        fs::write(
            dir.join("prob100/result-hpcc.burst"),
            "time 0.1 totalTxByte 5000\ntime 0.3 totalTxByte 15000\n",
        )
        .unwrap();
        fs::write(
            dir.join("result-hpcc.burst"),
            "time 0.150 qlen 1024 throughput 10000000000\n",
        )
        .unwrap();
        fs::write(dir.join("hpcc.buf"), "switch 0 qlen 1024 time 0.1\n").unwrap();
    }

    #[test]
    fn test_run_isolates_missing_units() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path());
        let config = ExperimentConfig::parse(CONFIG).unwrap();

        let report = run(&config, dir.path()).unwrap();

        let ids: Vec<&str> = report.figures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["burst", "result-hpcc_normalized", "cdf"]);
        assert_eq!(report.figures[2].series.len(), 1);

        // dcqcn has no log on either side: a flat zero difference, not a skip
        let burst = &report.figures[0];
        assert_eq!(burst.series.len(), 2);
        assert_eq!(burst.series[1].label, "dcqcn (treatment - baseline)");
        assert!(burst.series[1].points.iter().all(|p| p.1 == 0.0));

        let skipped: Vec<(&str, &str)> = report
            .skipped
            .iter()
            .map(|s| (s.job.as_str(), s.unit.as_str()))
            .collect();
        assert_eq!(
            skipped,
            vec![("workload", "missing.burst"), ("cdf", "Missing")]
        );
    }

    #[test]
    fn test_run_drops_figure_without_series() {
        let dir = TempDir::new().unwrap();
        let config = ExperimentConfig::parse(
            r#"
[[cdf]]
id = "cdf"
inputs = [{ label = "Missing", path = "missing.buf" }]
"#,
        )
        .unwrap();

        let report = run(&config, dir.path()).unwrap();
        assert!(report.figures.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].unit, "Missing");
    }

    #[test]
    fn test_run_aborts_on_invalid_window() {
        let dir = TempDir::new().unwrap();
        let mut config = ExperimentConfig::default();
        config.workload.push(crate::config::WorkloadSpec {
            window: crate::config::WindowSpec {
                start: 0.2,
                end: 0.1,
            },
            files: vec!["x.burst".to_string()],
            throughput_limits: None,
            qlen_limits: None,
        });

        let err = run(&config, dir.path()).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_skip_rethrows_non_recoverable() {
        let mut report = BatchReport::default();
        let err = AlignError::TimelineMismatch {
            left: 1,
            right: 2,
            index: 1,
        };
        assert!(report.skip("job", "unit", err).is_err());
        assert!(report.skipped.is_empty());
    }
}
