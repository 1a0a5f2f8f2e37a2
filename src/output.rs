//! Rendering figures as text, JSON or CSV, to stdout or an output directory

use crate::batch::SkippedUnit;
use crate::cli::OutputFormat;
use crate::csv_output::CsvOutput;
use crate::figure::{Figure, NamedSeries, SeriesKind};
use crate::json_output::JsonOutput;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

fn kind_name(kind: SeriesKind) -> &'static str {
    match kind {
        SeriesKind::Line => "line",
        SeriesKind::Step => "step",
        SeriesKind::Scatter => "scatter",
    }
}

fn format_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((lo, hi)) => format!("[{:.3}, {:.3}]", lo, hi),
        None => "-".to_string(),
    }
}

fn summarize_series(out: &mut String, series: &NamedSeries) {
    let _ = writeln!(
        out,
        "  {:<36} {:>7} {:>8} pts  x {:<26} y {}",
        series.label,
        kind_name(series.kind),
        series.len(),
        format_range(series.x_range()),
        format_range(series.y_range())
    );
}

/// Human-readable summary: one line per series
pub fn to_text(figure: &Figure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {}", figure.id, figure.title.replace('\n', " "));
    match &figure.y2_label {
        Some(y2) => {
            let _ = writeln!(
                out,
                "  x: {}  y: {}  y2: {}",
                figure.x_label, figure.y_label, y2
            );
        }
        None => {
            let _ = writeln!(out, "  x: {}  y: {}", figure.x_label, figure.y_label);
        }
    }
    for series in &figure.series {
        summarize_series(&mut out, series);
    }
    out
}

/// Render one figure in `format`
pub fn render(figure: &Figure, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => to_text(figure),
        OutputFormat::Csv => CsvOutput::new(figure).to_csv(),
        OutputFormat::Json => JsonOutput::new([figure])
            .to_json()
            .context("Failed to serialize figure to JSON")?,
    })
}

/// Write every figure to `<dir>/<figure id>.<ext>`
///
/// The directory is created if missing. Returns the written paths.
pub fn write_figures(figures: &[Figure], format: OutputFormat, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let path = dir.join(format!("{}.{}", figure.id, format.extension()));
        let content = render(figure, format)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "figure written");
        written.push(path);
    }
    Ok(written)
}

/// Print figures (and skipped units) to `out`
///
/// JSON is one document for all figures; text and CSV print each figure
/// in turn separated by a blank line.
pub fn print_figures<W: Write>(
    out: &mut W,
    figures: &[Figure],
    skipped: &[SkippedUnit],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = JsonOutput::new(figures)
                .with_skipped(skipped)
                .to_json()
                .context("Failed to serialize figures to JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text | OutputFormat::Csv => {
            for (i, figure) in figures.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{}", render(figure, format)?)?;
            }
            if format == OutputFormat::Text && !skipped.is_empty() {
                writeln!(out, "\nSkipped {} unit(s):", skipped.len())?;
                for unit in skipped {
                    writeln!(out, "  {}/{}: {}", unit.job, unit.unit, unit.reason)?;
                }
            }
        }
    }
    Ok(())
}
