use nalgebra::Matrix2;

use crate::error::{EllipseError, Result};

/// A 2×2 symmetric covariance matrix with finite entries and non-negative
/// variances. Positive semi-definiteness is only checked when the matrix is
/// decomposed.
///
/// Stored as `scale² · unit`, where the largest entry of `unit` is 1 in
/// magnitude, so huge or tiny sigmas never overflow or underflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Covariance {
  unit:  Matrix2<f64>,
  scale: f64,
}

impl Covariance {
  /// Builds `[[σx², ρσxσy], [ρσxσy, σy²]]`.
  pub fn from_sigmas(sigma_x: f64, sigma_y: f64, rho_xy: f64) -> Result<Self> {
    if !sigma_x.is_finite() || !sigma_y.is_finite() || !rho_xy.is_finite() {
      return Err(EllipseError::invalid(format!(
        "non-finite input (sigma_x={sigma_x}, sigma_y={sigma_y}, rho_xy={rho_xy})"
      )));
    }
    if sigma_x < 0.0 || sigma_y < 0.0 {
      return Err(EllipseError::invalid(format!(
        "negative standard deviation (sigma_x={sigma_x}, sigma_y={sigma_y})"
      )));
    }
    if !(-1.0..=1.0).contains(&rho_xy) {
      return Err(EllipseError::invalid(format!("correlation {rho_xy} outside [-1, 1]")));
    }

    let scale = sigma_x.max(sigma_y);
    if scale == 0.0 {
      return Ok(Covariance::zero());
    }

    let (a, b) = (sigma_x / scale, sigma_y / scale);
    let off = rho_xy * a * b;
    Ok(Covariance { unit: Matrix2::new(a * a, off, off, b * b), scale })
  }

  /// Takes a row-major matrix. The off-diagonal entries must agree to within
  /// a relative `1e-12`.
  pub fn from_matrix(m: [[f64; 2]; 2]) -> Result<Self> {
    if m.iter().flatten().any(|v| !v.is_finite()) {
      return Err(EllipseError::invalid("non-finite matrix entry"));
    }
    if m[0][0] < 0.0 || m[1][1] < 0.0 {
      return Err(EllipseError::invalid(format!(
        "negative variance ({}, {})",
        m[0][0], m[1][1]
      )));
    }

    let largest = m.iter().flatten().fold(0.0_f64, |a, v| a.max(v.abs()));
    if largest == 0.0 {
      return Ok(Covariance::zero());
    }

    let u = m.map(|row| row.map(|v| v / largest));
    if (u[0][1] - u[1][0]).abs() > 1e-12 {
      return Err(EllipseError::invalid(format!(
        "matrix is not symmetric ({} != {})",
        m[0][1], m[1][0]
      )));
    }

    let off = (u[0][1] + u[1][0]) / 2.0;
    Ok(Covariance { unit: Matrix2::new(u[0][0], off, off, u[1][1]), scale: largest.sqrt() })
  }

  fn zero() -> Self { Covariance { unit: Matrix2::zeros(), scale: 0.0 } }

  /// The full matrix. Entries overflow to infinity for sigmas beyond
  /// `sqrt(f64::MAX)`.
  pub fn matrix(&self) -> Matrix2<f64> { self.unit * (self.scale * self.scale) }

  /// The matrix divided by `scale²`.
  pub(crate) fn unit(&self) -> &Matrix2<f64> { &self.unit }

  /// The standard deviation the unit matrix is expressed in.
  pub(crate) fn scale(&self) -> f64 { self.scale }

  pub fn variance_x(&self) -> f64 { self.matrix()[(0, 0)] }
  pub fn variance_y(&self) -> f64 { self.matrix()[(1, 1)] }
  pub fn covariance_xy(&self) -> f64 { self.matrix()[(0, 1)] }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ellipse::tests::assert_close;

  #[test]
  fn assembles_from_sigmas() {
    let cov = Covariance::from_sigmas(3.0, 2.0, -0.5).unwrap();
    assert_close(cov.variance_x(), 9.0);
    assert_close(cov.variance_y(), 4.0);
    assert_close(cov.covariance_xy(), -3.0);
    assert_close(cov.matrix()[(1, 0)], -3.0);
  }

  #[test]
  fn rejects_bad_sigmas() {
    assert!(Covariance::from_sigmas(1.0, 1.0, 1.5).unwrap_err().is_invalid_covariance());
    assert!(Covariance::from_sigmas(1.0, 1.0, -1.01).unwrap_err().is_invalid_covariance());
    assert!(Covariance::from_sigmas(-1.0, 1.0, 0.0).unwrap_err().is_invalid_covariance());
    assert!(Covariance::from_sigmas(f64::NAN, 1.0, 0.0).unwrap_err().is_invalid_covariance());
  }

  #[test]
  fn correlation_bounds_are_inclusive() {
    assert!(Covariance::from_sigmas(1.0, 2.0, 1.0).is_ok());
    assert!(Covariance::from_sigmas(1.0, 2.0, -1.0).is_ok());
  }

  #[test]
  fn raw_matrix_checks() {
    assert!(Covariance::from_matrix([[1.0, 0.5], [0.5, 2.0]]).is_ok());
    assert!(Covariance::from_matrix([[1.0, 0.5], [0.4, 2.0]]).is_err());
    assert!(Covariance::from_matrix([[-1.0, 0.0], [0.0, 2.0]]).is_err());
    assert!(Covariance::from_matrix([[1.0, f64::INFINITY], [0.0, 2.0]]).is_err());
  }

  #[test]
  fn huge_entries_stay_finite() {
    let cov = Covariance::from_sigmas(1e200, 5e199, 0.5).unwrap();
    assert_eq!(cov.scale(), 1e200);
    assert!(cov.unit().iter().all(|v| v.is_finite() && v.abs() <= 1.0));

    let cov = Covariance::from_matrix([[1e308, 1e308], [1e308, 1e308]]).unwrap();
    assert_eq!(cov.unit(), &Matrix2::new(1.0, 1.0, 1.0, 1.0));
  }

  #[test]
  fn zero_matrix() {
    let cov = Covariance::from_sigmas(0.0, 0.0, 0.7).unwrap();
    assert_eq!(cov.matrix(), Matrix2::zeros());
    assert_eq!(Covariance::from_matrix([[0.0, 0.0], [0.0, 0.0]]).unwrap(), cov);
  }
}
