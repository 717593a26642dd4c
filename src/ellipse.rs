use kurbo::{BezPath, Point, Shape};
use nalgebra::SymmetricEigen;

use crate::{
  Bounds, Range,
  covariance::Covariance,
  error::{EllipseError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseOptions {
  /// How many standard deviations the ellipse spans along each axis.
  pub n_sigma:   f64,
  /// Relative tolerance used to tell a negative eigenvalue from rounding
  /// noise, and to detect circles.
  pub tolerance: f64,
}

impl Default for EllipseOptions {
  fn default() -> Self { EllipseOptions { n_sigma: 1.0, tolerance: 1e-9 } }
}

impl EllipseOptions {
  pub fn new() -> Self { EllipseOptions::default() }

  /// Negative and NaN values are treated as zero.
  pub fn n_sigma(&mut self, n_sigma: f64) -> &mut Self {
    self.n_sigma = n_sigma.max(0.0);
    self
  }

  pub fn tolerance(&mut self, tolerance: f64) -> &mut Self {
    self.tolerance = tolerance.max(0.0);
    self
  }
}

/// A confidence ellipse, ready to be drawn.
///
/// `width` is always the major axis, so `width >= height`. `angle_degrees` is
/// the rotation of the major axis from the positive x axis, in `[0, 180)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseDescriptor {
  pub center:        Point,
  pub width:         f64,
  pub height:        f64,
  pub angle_degrees: f64,
}

/// Computes the confidence ellipse of `cov` centered on `center`.
///
/// The eigenvalues of `cov` are the variances along the principal axes. They
/// are sorted descending, and the eigenvector of the largest one gives the
/// orientation. A zero eigenvalue gives a flat ellipse. Equal eigenvalues
/// give a circle, whose angle is reported as 0. Axes too long to represent
/// as an `f64` are an error.
pub fn parameterize(
  cov: &Covariance,
  center: Point,
  options: &EllipseOptions,
) -> Result<EllipseDescriptor> {
  let eigen = SymmetricEigen::new(*cov.unit());
  let (major, minor) =
    if eigen.eigenvalues[0] >= eigen.eigenvalues[1] { (0, 1) } else { (1, 0) };

  let scale = eigen.eigenvalues.amax();
  let noise = options.tolerance * scale;

  if eigen.eigenvalues[minor] < -noise {
    return Err(EllipseError::invalid(format!(
      "matrix is not positive semi-definite (eigenvalues {}, {})",
      eigen.eigenvalues[major], eigen.eigenvalues[minor]
    )));
  }

  // Rounding noise around zero is a singular axis.
  let snap = |var: f64| if var.abs() <= noise { 0.0 } else { var };
  let major_var = snap(eigen.eigenvalues[major]);
  let minor_var = snap(eigen.eigenvalues[minor]);

  let angle_degrees = if major_var - minor_var <= noise {
    0.0
  } else {
    let v = eigen.eigenvectors.column(major);
    normalize_angle(v[1].atan2(v[0]).to_degrees())
  };

  let axis = |var: f64| 2.0 * options.n_sigma * cov.scale() * var.max(0.0).sqrt();
  let (width, height) = (axis(major_var), axis(minor_var));
  if !width.is_finite() || !height.is_finite() {
    return Err(EllipseError::invalid(format!(
      "ellipse axes overflow (scale {}, n_sigma {})",
      cov.scale(),
      options.n_sigma
    )));
  }

  Ok(EllipseDescriptor { center, width, height, angle_degrees })
}

/// Folds an angle into `[0, 180)`.
fn normalize_angle(degrees: f64) -> f64 {
  let a = degrees.rem_euclid(180.0);
  if a >= 180.0 { 0.0 } else { a }
}

impl EllipseDescriptor {
  pub fn angle_radians(&self) -> f64 { self.angle_degrees.to_radians() }

  /// Half axis lengths, major first.
  pub fn radii(&self) -> (f64, f64) { (self.width / 2.0, self.height / 2.0) }

  pub fn is_degenerate(&self) -> bool { self.height == 0.0 }

  pub fn to_kurbo(&self) -> kurbo::Ellipse {
    kurbo::Ellipse::new(self.center, self.radii(), self.angle_radians())
  }

  pub fn to_path(&self, tolerance: f64) -> BezPath { self.to_kurbo().to_path(tolerance) }

  /// The tightest axis-aligned box around the ellipse.
  pub fn bounds(&self) -> Bounds {
    let (a, b) = self.radii();
    let (sin, cos) = self.angle_radians().sin_cos();

    let half_x = ((a * cos).powi(2) + (b * sin).powi(2)).sqrt();
    let half_y = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt();

    Bounds::new(Range::around(self.center.x, half_x), Range::around(self.center.y, half_y))
  }
}
