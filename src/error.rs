//! Error taxonomy for log alignment
//!
//! Parse and data errors are recovered per metric/file by the batch runner.
//! Structural errors (misaligned timelines, inverted windows) are programming
//! errors and always surface to the caller.

use thiserror::Error;

/// Errors that can occur while parsing, aligning or summarizing series
#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Missing field '{0}' in record")]
    MissingField(String),

    #[error("Empty series: {0}")]
    EmptySeries(String),

    #[error("Timeline mismatch: {left} points vs {right} points (first divergence at index {index})")]
    TimelineMismatch {
        left: usize,
        right: usize,
        index: usize,
    },

    #[error("Invalid time window [{start}, {end}]")]
    InvalidWindow { start: f64, end: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlignError {
    /// Whether a batch may skip the failing unit and continue
    ///
    /// `TimelineMismatch` means a difference was taken before resampling onto
    /// a shared timeline; `InvalidWindow` and `Config` mean the job itself is
    /// wrong. Neither can be fixed by skipping one file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AlignError::MalformedRecord(_)
                | AlignError::MissingField(_)
                | AlignError::EmptySeries(_)
                | AlignError::Io(_)
        )
    }
}

/// Result type for alignment operations
pub type Result<T> = std::result::Result<T, AlignError>;
