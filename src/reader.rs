//! Log file reader
//!
//! Streams a log line by line through the record parser. Unparseable lines are
//! counted and skipped, never fatal; only I/O failures surface as errors.

use crate::error::{AlignError, Result};
use crate::record::{self, Record};
use crate::series::TimeSeries;
use crate::window::TimeWindow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Per-file parse counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines consumed
    pub lines: usize,
    /// Records kept
    pub kept: usize,
    /// Lines that were not valid key/value records
    pub malformed: usize,
    /// Records lacking a required field (including `time`)
    pub missing_field: usize,
    /// Records outside the time window
    pub out_of_window: usize,
}

impl ReadStats {
    pub fn skipped(&self) -> usize {
        self.lines - self.kept
    }
}

/// Records read from one log, with counters
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    pub records: Vec<Record>,
    pub stats: ReadStats,
}

/// Open a log file for buffered reading
pub fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Parse every line of `reader`, keeping records inside `window`
pub fn read_records<R: BufRead>(mut reader: R, window: &TimeWindow) -> Result<RecordBatch> {
    let mut batch = RecordBatch::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        batch.stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        match Record::parse(&line) {
            Ok(record) if window.contains(record.time()) => {
                batch.stats.kept += 1;
                batch.records.push(record);
            }
            Ok(_) => batch.stats.out_of_window += 1,
            Err(AlignError::MissingField(_)) => batch.stats.missing_field += 1,
            Err(_) => batch.stats.malformed += 1,
        }
    }

    Ok(batch)
}

/// Read `(time, field)` pairs from a log file into a series
///
/// Records without `field` are dropped and counted.
pub fn read_series(path: &Path, field: &str, window: &TimeWindow) -> Result<TimeSeries> {
    let batch = read_records(open(path)?, window)?;
    let (series, stats) = series_from_batch(batch, field);

    tracing::debug!(
        path = %path.display(),
        field,
        lines = stats.lines,
        kept = stats.kept,
        malformed = stats.malformed,
        missing_field = stats.missing_field,
        out_of_window = stats.out_of_window,
        "read series"
    );

    Ok(series)
}

/// Project a record batch onto one field
pub fn series_from_batch(batch: RecordBatch, field: &str) -> (TimeSeries, ReadStats) {
    let mut stats = batch.stats;
    let mut points = Vec::with_capacity(batch.records.len());
    for rec in &batch.records {
        match rec.get(field) {
            Some(value) => points.push((rec.time(), value)),
            None => {
                stats.kept -= 1;
                stats.missing_field += 1;
            }
        }
    }
    (TimeSeries::from_points(points), stats)
}

/// Read the numeric column at `index` of a fixed-layout log
pub fn read_column<R: BufRead>(
    mut reader: R,
    index: usize,
    min_tokens: usize,
) -> Result<(Vec<f64>, ReadStats)> {
    let mut samples = Vec::new();
    let mut stats = ReadStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        match record::parse_column(&String::from_utf8_lossy(&buf), index, min_tokens) {
            Some(value) => {
                stats.kept += 1;
                samples.push(value);
            }
            None => stats.malformed += 1,
        }
    }

    Ok((samples, stats))
}

/// [`read_column`] over a file path
pub fn read_column_file(path: &Path, index: usize, min_tokens: usize) -> Result<Vec<f64>> {
    let (samples, stats) = read_column(open(path)?, index, min_tokens)?;
    tracing::debug!(
        path = %path.display(),
        index,
        lines = stats.lines,
        kept = stats.kept,
        malformed = stats.malformed,
        "read column"
    );
    Ok(samples)
}
