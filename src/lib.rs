//! simtrace - alignment and summary of network simulation trace logs
//!
//! Simulator logs are irregular event streams: each source writes a line only
//! when something changes. This library parses those lines into step-function
//! time series, merges several series onto a common timeline, forward-fills
//! them, and derives differences, unit conversions and empirical CDFs ready
//! for plotting.
//!
//! The [`batch`] runner executes a whole TOML experiment (see [`config`]);
//! the building blocks are usable on their own:
//!
//! ```
//! use simtrace::{difference, extend, get_projection, merge, TimeSeries, TimeWindow};
//!
//! let window = TimeWindow::new(0.0, 0.3).unwrap();
//! let a = extend(&TimeSeries::from_points(vec![(0.0, 10.0), (0.2, 20.0)]), &window);
//! let b = extend(&TimeSeries::from_points(vec![(0.1, 5.0), (0.3, 15.0)]), &window);
//!
//! let timeline = merge(&[&a, &b], &window);
//! let a = get_projection(&a, &timeline).unwrap();
//! let b = get_projection(&b, &timeline).unwrap();
//! assert_eq!(difference(&a, &b).unwrap().values(), &[-5.0, -5.0, -15.0, -5.0]);
//! ```

pub mod batch;
pub mod boundary;
pub mod cdf;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod figure;
pub mod json_output;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod resample;
pub mod series;
pub mod timeline;
pub mod transform;
pub mod window;

pub use boundary::extend;
pub use cdf::{cdf, CdfPoint, EmpiricalDistribution};
pub use config::ExperimentConfig;
pub use error::{AlignError, Result};
pub use figure::{Figure, NamedSeries};
pub use record::{parse_line, Record};
pub use resample::{get_projection, value_at};
pub use series::{Point, TimeSeries};
pub use timeline::{merge, CommonTimeline};
pub use transform::{convert, difference, Conversion};
pub use window::TimeWindow;
