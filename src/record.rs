//! Record parser for simulator key/value logs
//!
//! Each log line is a flat list of whitespace-separated `key value` pairs:
//!
//! ```text
//! time 0.150123 qlen 20480 throughput 9800000000
//! RTT 250 time 0.150456 qlen(0) 512 sport 10000
//! ```
//!
//! Every record must carry a `time` field (seconds). Other keys are declared by
//! the caller through [`Record::require`]. Buffer logs use a fixed column
//! layout instead and go through [`parse_column`].

use crate::error::{AlignError, Result};
use crate::window::TimeWindow;
use std::collections::HashMap;

/// Well-known field names
pub mod fields {
    pub const TIME: &str = "time";
    pub const TOTAL_TX_BYTE: &str = "totalTxByte";
    pub const THROUGHPUT: &str = "throughput";
    pub const QLEN: &str = "qlen";
    pub const RTT: &str = "RTT";
    pub const QLEN_PORT0: &str = "qlen(0)";
    pub const SPORT: &str = "sport";
}

/// One parsed log line: the mandatory timestamp plus any other numeric fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    time: f64,
    fields: HashMap<String, f64>,
}

impl Record {
    /// Parse a line into a record
    ///
    /// # Errors
    /// - `MalformedRecord` for an empty line, an odd token count, or a value
    ///   that is not a finite number
    /// - `MissingField("time")` when no `time` key is present
    ///
    /// A key repeated within one line keeps its last value.
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(AlignError::MalformedRecord("empty line".to_string()));
        }
        if tokens.len() % 2 != 0 {
            return Err(AlignError::MalformedRecord(format!(
                "odd token count ({})",
                tokens.len()
            )));
        }

        let mut map = HashMap::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks_exact(2) {
            let value = parse_number(pair[1]).ok_or_else(|| {
                AlignError::MalformedRecord(format!(
                    "non-numeric value '{}' for '{}'",
                    pair[1], pair[0]
                ))
            })?;
            map.insert(pair[0].to_string(), value);
        }

        let time = map
            .remove(fields::TIME)
            .ok_or_else(|| AlignError::MissingField(fields::TIME.to_string()))?;

        Ok(Self { time, fields: map })
    }

    /// Timestamp in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Look up a field by name (`time` included)
    pub fn get(&self, key: &str) -> Option<f64> {
        if key == fields::TIME {
            Some(self.time)
        } else {
            self.fields.get(key).copied()
        }
    }

    /// Look up a field that the caller requires
    pub fn field(&self, key: &str) -> Result<f64> {
        self.get(key)
            .ok_or_else(|| AlignError::MissingField(key.to_string()))
    }

    /// Extract a fixed set of required fields in the order given
    ///
    /// # Example
    /// ```
    /// use simtrace::record::Record;
    ///
    /// let record = Record::parse("time 0.15 qlen 2048 throughput 9.8e9").unwrap();
    /// let [qlen, tput] = record.require(["qlen", "throughput"]).unwrap();
    /// assert_eq!(qlen, 2048.0);
    /// assert_eq!(tput, 9.8e9);
    /// ```
    pub fn require<const N: usize>(&self, keys: [&str; N]) -> Result<[f64; N]> {
        let mut out = [0.0; N];
        for (slot, key) in out.iter_mut().zip(keys) {
            *slot = self.field(key)?;
        }
        Ok(out)
    }

    /// Equality filter on a numeric field (absent fields never match)
    pub fn matches(&self, key: &str, value: f64) -> bool {
        self.get(key) == Some(value)
    }

    /// Names of the non-time fields, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Parse a line and keep it only if its timestamp falls inside `window`
///
/// Malformed lines and lines without `time` yield `None`; this never fails.
pub fn parse_line(line: &str, window: &TimeWindow) -> Option<Record> {
    Record::parse(line)
        .ok()
        .filter(|record| window.contains(record.time()))
}

/// Extract the numeric token at `index` from a fixed-layout line
///
/// Lines with fewer than `min_tokens` tokens, or whose token at `index` is not
/// a finite number, yield `None`.
///
/// ```
/// use simtrace::record::parse_column;
///
/// assert_eq!(parse_column("switch 0 qlen 512 time 0.0007", 3, 6), Some(512.0));
/// assert_eq!(parse_column("switch 0 qlen", 3, 6), None);
/// ```
pub fn parse_column(line: &str, index: usize, min_tokens: usize) -> Option<f64> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < min_tokens.max(index + 1) {
        return None;
    }
    parse_number(tokens[index])
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
