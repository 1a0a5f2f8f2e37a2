//! Closed time window `[start, end]` in seconds

use crate::error::{AlignError, Result};
use serde::Serialize;

/// Region of interest on the simulation clock (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Create a window, rejecting non-finite or inverted bounds
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(AlignError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering every finite timestamp
    pub fn unbounded() -> Self {
        Self {
            start: f64::MIN,
            end: f64::MAX,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Inclusive on both edges
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_contains_edges() {
        let window = TimeWindow::new(0.13, 0.35).unwrap();
        assert!(window.contains(0.13));
        assert!(window.contains(0.35));
        assert!(window.contains(0.2));
        assert!(!window.contains(0.129_999));
        assert!(!window.contains(0.350_001));
    }

    #[test]
    fn test_degenerate_window_allowed() {
        let window = TimeWindow::new(0.5, 0.5).unwrap();
        assert!(window.contains(0.5));
        assert_eq!(window.duration(), 0.0);
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(matches!(
            TimeWindow::new(0.35, 0.13),
            Err(AlignError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_non_finite_window_rejected() {
        assert!(TimeWindow::new(f64::NAN, 1.0).is_err());
        assert!(TimeWindow::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_unbounded_contains_everything_finite() {
        let window = TimeWindow::unbounded();
        assert!(window.contains(-1.0e300));
        assert!(window.contains(0.0));
        assert!(window.contains(1.0e300));
    }
}
