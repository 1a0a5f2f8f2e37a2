use anyhow::{Context, Result};
use clap::Parser;
use simtrace::batch::{self, BatchReport};
use simtrace::cli::{Cli, Command, OutputFormat, WindowArgs};
use simtrace::config::{
    BurstDiffSpec, CdfInput, CdfSpec, ExperimentConfig, ScatterSpec, UnitBase, WindowSpec,
    WorkloadSpec,
};
use simtrace::output;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` enables everything, otherwise warnings only
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_string(path))
}

fn window_spec(window: WindowArgs) -> WindowSpec {
    WindowSpec {
        start: window.start,
        end: window.end,
    }
}

/// Turn a one-off subcommand into a single-job experiment
fn single_job(command: Command) -> ExperimentConfig {
    let mut config = ExperimentConfig::default();
    match command {
        Command::Diff {
            baseline,
            treatment,
            window,
            field,
            binary,
            label,
        } => config.burst_diff.push(BurstDiffSpec {
            id: "burst_diff".to_string(),
            title: None,
            window: window_spec(window),
            metrics: vec![label.unwrap_or_else(|| stem(&treatment))],
            baseline: path_string(&baseline),
            treatment: path_string(&treatment),
            baseline_label: stem(&baseline),
            treatment_label: stem(&treatment),
            field,
            unit_base: if binary {
                UnitBase::Binary
            } else {
                UnitBase::Decimal
            },
        }),
        Command::Workload { file, window } => config.workload.push(WorkloadSpec {
            window: window_spec(window),
            files: vec![path_string(&file)],
            throughput_limits: None,
            qlen_limits: None,
        }),
        Command::Scatter { file, sport } => config.scatter.push(ScatterSpec {
            id: "rtt_qlen_scatter".to_string(),
            file: path_string(&file),
            sport,
            window: None,
        }),
        Command::Cdf {
            files,
            column,
            min_tokens,
            decimal,
        } => config.cdf.push(CdfSpec {
            id: "buffer_cdf".to_string(),
            column,
            min_tokens,
            unit_base: if decimal {
                UnitBase::Decimal
            } else {
                UnitBase::Binary
            },
            x_limits: None,
            y_limits: None,
            inputs: files
                .iter()
                .map(|f| CdfInput {
                    label: stem(f),
                    path: path_string(f),
                })
                .collect(),
        }),
        Command::Run { .. } => {}
    }
    config
}

fn load_experiment(config: Option<&Path>) -> Result<ExperimentConfig> {
    match config {
        Some(path) => ExperimentConfig::from_toml(path),
        None => ExperimentConfig::powertcp_default(),
    }
}

fn emit(format: OutputFormat, output_dir: Option<&Path>, report: &BatchReport) -> Result<()> {
    match output_dir {
        Some(dir) => {
            let written = output::write_figures(&report.figures, format, dir)?;
            for path in &written {
                println!("{}", path.display());
            }
            for unit in &report.skipped {
                eprintln!("skipped {}/{}: {}", unit.job, unit.unit, unit.reason);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            output::print_figures(&mut out, &report.figures, &report.skipped, format)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let (config, base_dir, single) = match args.command {
        Command::Run {
            ref config,
            ref base_dir,
        } => (load_experiment(config.as_deref())?, base_dir.clone(), false),
        command => (single_job(command), PathBuf::from("."), true),
    };

    let report = batch::run(&config, &base_dir)
        .with_context(|| format!("Batch aborted (base dir {})", base_dir.display()))?;

    // A one-off command has a single unit of work; skipping it is a failure
    if single && report.figures.is_empty() {
        let reasons: Vec<String> = report.skipped.iter().map(|s| s.reason.clone()).collect();
        anyhow::bail!("No output produced: {}", reasons.join("; "));
    }

    emit(args.format, args.output_dir.as_deref(), &report)
}
