//! Experiment configuration
//!
//! Describes which logs to compare and how, so per-condition directory
//! conventions live in a TOML file rather than in code. Path templates use a
//! `{metric}` placeholder expanded once per metric.
//!
//! # Example TOML
//! ```toml
//! [[burst_diff]]
//! id = "burst_diff"
//! window = { start = 0.13, end = 0.35 }
//! metrics = ["powerInt", "hpcc"]
//! baseline = "result_burst_prob0/result-{metric}.burst"
//! treatment = "result_burst_prob100/result-{metric}.burst"
//!
//! [[cdf]]
//! id = "buffer_cdf"
//! x_limits = [-10.0, 210.0]
//! inputs = [{ label = "HPCC", path = "result-hpcc.buf" }]
//! ```

use crate::error::{AlignError, Result};
use crate::record::fields;
use crate::transform::{BYTES_TO_KB, BYTES_TO_KIB};
use crate::window::TimeWindow;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const METRIC_PLACEHOLDER: &str = "{metric}";

/// Time window as written in configuration (validated on use)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub start: f64,
    pub end: f64,
}

impl WindowSpec {
    pub fn window(&self) -> Result<TimeWindow> {
        TimeWindow::new(self.start, self.end)
    }
}

/// Whether "kilo" means 1000 or 1024
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitBase {
    Decimal,
    Binary,
}

impl UnitBase {
    /// Bytes to kilobytes factor for this base
    pub fn kilo_factor(&self) -> f64 {
        match self {
            UnitBase::Decimal => BYTES_TO_KB,
            UnitBase::Binary => BYTES_TO_KIB,
        }
    }
}

/// Difference of a cumulative counter between two conditions, per metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstDiffSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub window: WindowSpec,
    pub metrics: Vec<String>,
    /// Path template of the baseline condition's logs
    pub baseline: String,
    /// Path template of the treatment condition's logs
    pub treatment: String,
    #[serde(default = "default_baseline_label")]
    pub baseline_label: String,
    #[serde(default = "default_treatment_label")]
    pub treatment_label: String,
    #[serde(default = "default_tx_field")]
    pub field: String,
    #[serde(default = "default_decimal")]
    pub unit_base: UnitBase,
}

impl BurstDiffSpec {
    pub fn baseline_path(&self, metric: &str) -> String {
        self.baseline.replace(METRIC_PLACEHOLDER, metric)
    }

    pub fn treatment_path(&self, metric: &str) -> String {
        self.treatment.replace(METRIC_PLACEHOLDER, metric)
    }
}

/// Throughput and queue length over a short window, one figure per log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSpec {
    pub window: WindowSpec,
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_limits: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qlen_limits: Option<(f64, f64)>,
}

impl WorkloadSpec {
    /// Figure id of one workload log: its file stem plus `_normalized`
    pub fn figure_id(file: &str) -> String {
        let stem = Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string());
        format!("{}_normalized", stem)
    }
}

/// RTT against queue length for one source port
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub id: String,
    pub file: String,
    #[serde(default = "default_sport")]
    pub sport: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSpec>,
}

/// One labelled input of a CDF group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdfInput {
    pub label: String,
    pub path: String,
}

/// Buffer-occupancy CDFs of several logs on one figure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdfSpec {
    pub id: String,
    /// Zero-based token index of the queue length
    #[serde(default = "default_column")]
    pub column: usize,
    /// Shorter lines are ignored
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,
    #[serde(default = "default_binary")]
    pub unit_base: UnitBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_limits: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_limits: Option<(f64, f64)>,
    pub inputs: Vec<CdfInput>,
}

fn default_baseline_label() -> String {
    "baseline".to_string()
}

fn default_treatment_label() -> String {
    "treatment".to_string()
}

fn default_tx_field() -> String {
    fields::TOTAL_TX_BYTE.to_string()
}

fn default_decimal() -> UnitBase {
    UnitBase::Decimal
}

fn default_binary() -> UnitBase {
    UnitBase::Binary
}

fn default_sport() -> u16 {
    10000
}

fn default_column() -> usize {
    3
}

fn default_min_tokens() -> usize {
    6
}

/// Full set of jobs for one experiment directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub burst_diff: Vec<BurstDiffSpec>,
    #[serde(default)]
    pub workload: Vec<WorkloadSpec>,
    #[serde(default)]
    pub scatter: Vec<ScatterSpec>,
    #[serde(default)]
    pub cdf: Vec<CdfSpec>,
}

impl ExperimentConfig {
    /// Load and validate an experiment file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read experiment file: {}", path.as_ref().display())
        })?;
        Self::parse(&content).with_context(|| {
            format!("Invalid experiment file: {}", path.as_ref().display())
        })
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse TOML experiment definition")?;
        config.validate()?;
        Ok(config)
    }

    /// The PowerTCP evaluation jobs (burst, workload, RTT scatter, buffer CDFs)
    pub fn powertcp_default() -> anyhow::Result<Self> {
        const DEFAULT_TOML: &str = include_str!("../experiments-default.toml");
        Self::parse(DEFAULT_TOML).context("Failed to parse embedded experiments-default.toml")
    }

    pub fn is_empty(&self) -> bool {
        self.burst_diff.is_empty()
            && self.workload.is_empty()
            && self.scatter.is_empty()
            && self.cdf.is_empty()
    }

    /// Check windows, ids and required lists
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut claim = |id: &str| -> Result<()> {
            if id.trim().is_empty() {
                return Err(AlignError::Config("job id must not be empty".to_string()));
            }
            if !ids.insert(id.to_string()) {
                return Err(AlignError::Config(format!("duplicate job id '{}'", id)));
            }
            Ok(())
        };

        for job in &self.burst_diff {
            claim(&job.id)?;
            job.window.window()?;
            if job.metrics.is_empty() {
                return Err(AlignError::Config(format!(
                    "burst_diff '{}' lists no metrics",
                    job.id
                )));
            }
            for template in [&job.baseline, &job.treatment] {
                if job.metrics.len() > 1 && !template.contains(METRIC_PLACEHOLDER) {
                    return Err(AlignError::Config(format!(
                        "burst_diff '{}': path '{}' has no {} placeholder",
                        job.id, template, METRIC_PLACEHOLDER
                    )));
                }
            }
        }

        for job in &self.workload {
            job.window.window()?;
            if job.files.is_empty() {
                return Err(AlignError::Config("workload job lists no files".to_string()));
            }
            for file in &job.files {
                claim(&WorkloadSpec::figure_id(file))?;
            }
        }

        for job in &self.scatter {
            claim(&job.id)?;
            if let Some(window) = &job.window {
                window.window()?;
            }
        }

        for job in &self.cdf {
            claim(&job.id)?;
            if job.inputs.is_empty() {
                return Err(AlignError::Config(format!("cdf '{}' lists no inputs", job.id)));
            }
            if job.min_tokens <= job.column {
                return Err(AlignError::Config(format!(
                    "cdf '{}': min_tokens ({}) must exceed column ({})",
                    job.id, job.min_tokens, job.column
                )));
            }
        }

        Ok(())
    }
}

/// Resolve a configured path against the experiment base directory
pub fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
