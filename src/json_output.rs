//! JSON output format for figures and batch reports

use crate::batch::SkippedUnit;
use crate::figure::Figure;
use serde::Serialize;

/// Versioned JSON document wrapping one or more figures
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub version: String,
    pub format: String,
    pub figures: Vec<&'a Figure>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<&'a SkippedUnit>,
}

impl<'a> JsonOutput<'a> {
    pub fn new(figures: impl IntoIterator<Item = &'a Figure>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "simtrace-json-v1".to_string(),
            figures: figures.into_iter().collect(),
            skipped: Vec::new(),
        }
    }

    /// Attach the units a batch run skipped
    pub fn with_skipped(mut self, skipped: &'a [SkippedUnit]) -> Self {
        self.skipped = skipped.iter().collect();
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
