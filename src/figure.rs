//! Numeric figure description handed to a renderer
//!
//! A `Figure` is what a plotting front-end needs to draw one chart: axis
//! labels, optional axis limits and the named series. No pixels here.

use crate::cdf::EmpiricalDistribution;
use crate::series::TimeSeries;
use serde::Serialize;

/// How a renderer should draw a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Step,
    Scatter,
}

/// Which y axis a series is plotted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Primary,
    Secondary,
}

/// One labelled list of `(x, y)` points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub axis: Axis,
    pub points: Vec<(f64, f64)>,
}

impl NamedSeries {
    pub fn new(label: impl Into<String>, kind: SeriesKind, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            kind,
            axis: Axis::Primary,
            points,
        }
    }

    pub fn from_series(label: impl Into<String>, kind: SeriesKind, series: &TimeSeries) -> Self {
        Self::new(label, kind, series.iter().map(|p| (p.time, p.value)).collect())
    }

    pub fn from_cdf(label: impl Into<String>, dist: &EmpiricalDistribution) -> Self {
        Self::new(
            label,
            SeriesKind::Step,
            dist.points()
                .iter()
                .map(|p| (p.value, p.probability))
                .collect(),
        )
    }

    pub fn on_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min, max)` of the x coordinates, `None` when empty
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|p| p.0))
    }

    /// `(min, max)` of the y coordinates, `None` when empty
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|p| p.1))
    }
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// A chart's worth of series plus presentation metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Stable identifier, used as the output file stem
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_limits: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_limits: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2_limits: Option<(f64, f64)>,
    pub series: Vec<NamedSeries>,
}

impl Figure {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            y2_label: None,
            x_limits: None,
            y_limits: None,
            y2_limits: None,
            series: Vec::new(),
        }
    }

    pub fn with_y2_label(mut self, label: impl Into<String>) -> Self {
        self.y2_label = Some(label.into());
        self
    }

    pub fn with_x_limits(mut self, limits: Option<(f64, f64)>) -> Self {
        self.x_limits = limits;
        self
    }

    pub fn with_y_limits(mut self, limits: Option<(f64, f64)>) -> Self {
        self.y_limits = limits;
        self
    }

    pub fn with_y2_limits(mut self, limits: Option<(f64, f64)>) -> Self {
        self.y2_limits = limits;
        self
    }

    pub fn push(&mut self, series: NamedSeries) {
        self.series.push(series);
    }

    pub fn total_points(&self) -> usize {
        self.series.iter().map(NamedSeries::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdf::cdf;

    #[test]
    fn test_named_series_ranges() {
        let s = NamedSeries::new(
            "a",
            SeriesKind::Line,
            vec![(1.0, -2.0), (0.5, 4.0), (3.0, 0.0)],
        );
        assert_eq!(s.x_range(), Some((0.5, 3.0)));
        assert_eq!(s.y_range(), Some((-2.0, 4.0)));
    }

    #[test]
    fn test_empty_series_has_no_range() {
        let s = NamedSeries::new("empty", SeriesKind::Scatter, vec![]);
        assert!(s.is_empty());
        assert_eq!(s.x_range(), None);
    }

    #[test]
    fn test_from_cdf_maps_value_to_probability() {
        let dist = cdf(&[2.0, 1.0]).unwrap();
        let s = NamedSeries::from_cdf("HPCC", &dist);
        assert_eq!(s.kind, SeriesKind::Step);
        assert_eq!(s.points, vec![(1.0, 0.5), (2.0, 1.0)]);
    }

    #[test]
    fn test_figure_serialization_omits_unset_limits() {
        let mut fig = Figure::new("f", "Title", "x", "y");
        fig.push(NamedSeries::new("s", SeriesKind::Line, vec![(0.0, 1.0)]));
        let json = serde_json::to_string(&fig).unwrap();
        assert!(!json.contains("x_limits"));
        assert!(!json.contains("y2_label"));
        assert!(json.contains("\"kind\":\"line\""));
        assert!(json.contains("\"axis\":\"primary\""));
        assert_eq!(fig.total_points(), 1);
    }
}
