use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T, E = EllipseError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EllipseError {
  /// The input does not describe a positive semi-definite covariance.
  #[error("invalid covariance: {reason}")]
  InvalidCovariance { reason: String },

  #[error("missing value in column `{column}`")]
  MissingValue { column: String },

  #[error(transparent)]
  Frame(#[from] PolarsError),
}

/// A failure of a single record in a batch, tagged with its row.
#[derive(Debug, Error)]
#[error("row {row}: {error}")]
pub struct RecordError {
  pub row:   usize,
  #[source]
  pub error: EllipseError,
}

impl EllipseError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    EllipseError::InvalidCovariance { reason: reason.into() }
  }

  pub fn is_invalid_covariance(&self) -> bool {
    matches!(self, EllipseError::InvalidCovariance { .. })
  }
}

pub trait ResultExt<T> {
  /// Logs the error, and turns the result into an option.
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{e}");
        None
      }
    }
  }
}
