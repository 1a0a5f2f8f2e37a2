//! CSV output format for figures
//!
//! One row per point with a `series,x,y` header, so a figure can be loaded
//! straight into a spreadsheet or a plotting script.

use crate::figure::Figure;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a> {
    figure: &'a Figure,
}

impl<'a> CsvOutput<'a> {
    pub fn new(figure: &'a Figure) -> Self {
        Self { figure }
    }

    fn header() -> &'static str {
        "series,x,y"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(Self::header());
        output.push('\n');

        for series in &self.figure.series {
            let label = Self::escape_field(&series.label);
            for (x, y) in &series.points {
                output.push_str(&format!("{},{},{}\n", label, x, y));
            }
        }

        output
    }
}
