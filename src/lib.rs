//! Confidence ellipses and error bars for points with correlated uncertainty.
//!
//! ```
//! use covellipse::{EllipseBuilder, UncertainPoint};
//!
//! let report = EllipseBuilder::new().build(&[UncertainPoint::new(0.0, 0.0, 3.0, 1.0, 0.0)]);
//! let ellipse = report.ellipses().next().unwrap();
//! assert!((ellipse.width - 6.0).abs() < 1e-9);
//! assert!((ellipse.height - 2.0).abs() < 1e-9);
//! ```

mod batch;
mod bounds;
mod covariance;
mod ellipse;
mod error;
mod frame;
mod point;

pub use batch::{BatchReport, EllipseBuilder, RowEllipse};
pub use bounds::{Bounds, Range};
pub use covariance::Covariance;
pub use ellipse::{EllipseDescriptor, EllipseOptions, parameterize};
pub use error::{EllipseError, RecordError, Result, ResultExt};
pub use frame::{ColumnNames, read_points};
pub use point::{ErrorBars, UncertainPoint};
