use polars::prelude::DataFrame;
use rayon::prelude::*;

use crate::{
  Bounds,
  ellipse::{EllipseDescriptor, EllipseOptions},
  error::{RecordError, Result},
  frame::{ColumnNames, read_points},
  point::UncertainPoint,
};

/// Turns a table of uncertain points into ellipses, one per row.
#[derive(Debug, Default)]
pub struct EllipseBuilder {
  options: EllipseOptions,
  columns: ColumnNames,
}

/// The outcome of a batch. Rows keep the index they had in the input.
#[derive(Debug)]
pub struct BatchReport {
  len:      usize,
  ellipses: Vec<RowEllipse>,
  failures: Vec<RecordError>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowEllipse {
  pub row:     usize,
  pub ellipse: EllipseDescriptor,
}

impl EllipseBuilder {
  pub fn new() -> Self { EllipseBuilder::default() }

  pub fn n_sigma(&mut self, n_sigma: f64) -> &mut Self {
    self.options.n_sigma(n_sigma);
    self
  }

  pub fn tolerance(&mut self, tolerance: f64) -> &mut Self {
    self.options.tolerance(tolerance);
    self
  }

  pub fn columns(&mut self, columns: ColumnNames) -> &mut Self {
    self.columns = columns;
    self
  }

  pub fn options(&self) -> &EllipseOptions { &self.options }

  pub fn build(&self, points: &[UncertainPoint]) -> BatchReport {
    BatchReport::collect(points.iter().map(|p| p.ellipse(&self.options)))
  }

  /// Same as [`build`](Self::build), spread over the rayon pool.
  pub fn build_par(&self, points: &[UncertainPoint]) -> BatchReport {
    let outcomes: Vec<_> = points.par_iter().map(|p| p.ellipse(&self.options)).collect();
    BatchReport::collect(outcomes)
  }

  /// Reads the configured columns from `df` and builds one ellipse per row.
  /// Only table-level problems, like a missing column, fail the whole call.
  pub fn build_frame(&self, df: &DataFrame) -> Result<BatchReport> {
    let rows = read_points(df, &self.columns)?;
    Ok(BatchReport::collect(rows.into_iter().map(|p| p?.ellipse(&self.options))))
  }
}

impl BatchReport {
  fn collect(outcomes: impl IntoIterator<Item = Result<EllipseDescriptor>>) -> Self {
    let mut report = BatchReport { len: 0, ellipses: vec![], failures: vec![] };

    for (row, outcome) in outcomes.into_iter().enumerate() {
      report.len += 1;
      match outcome {
        Ok(ellipse) => report.ellipses.push(RowEllipse { row, ellipse }),
        Err(error) => {
          tracing::warn!(row, %error, "skipping record");
          report.failures.push(RecordError { row, error });
        }
      }
    }

    tracing::debug!(
      records = report.len,
      failures = report.failures.len(),
      "built covariance ellipses"
    );
    report
  }

  /// Number of input records.
  pub fn len(&self) -> usize { self.len }
  pub fn is_empty(&self) -> bool { self.len == 0 }
  pub fn is_complete(&self) -> bool { self.failures.is_empty() }

  /// Successful rows, in input order.
  pub fn rows(&self) -> &[RowEllipse] { &self.ellipses }
  pub fn ellipses(&self) -> impl Iterator<Item = &EllipseDescriptor> + '_ {
    self.ellipses.iter().map(|r| &r.ellipse)
  }
  pub fn failures(&self) -> &[RecordError] { &self.failures }

  /// Data bounds covering every successful ellipse.
  pub fn bounds(&self) -> Bounds { self.ellipses().map(|e| e.bounds()).collect() }

  /// Every ellipse in input order, or the first failed row.
  pub fn into_result(self) -> std::result::Result<Vec<EllipseDescriptor>, RecordError> {
    match self.failures.into_iter().next() {
      Some(err) => Err(err),
      None => Ok(self.ellipses.into_iter().map(|r| r.ellipse).collect()),
    }
  }

  /// One ellipse per input row, replacing failed rows with `fill`.
  pub fn fill_failures(
    self,
    mut fill: impl FnMut(&RecordError) -> EllipseDescriptor,
  ) -> Vec<EllipseDescriptor> {
    let mut ellipses = self.ellipses.into_iter().peekable();
    let mut failures = self.failures.into_iter();

    (0..self.len)
      .filter_map(|row| {
        if ellipses.peek().is_some_and(|r| r.row == row) {
          ellipses.next().map(|r| r.ellipse)
        } else {
          failures.next().map(|f| fill(&f))
        }
      })
      .collect()
  }
}
