use kurbo::{BezPath, Point};

use crate::{
  Range,
  covariance::Covariance,
  ellipse::{EllipseDescriptor, EllipseOptions, parameterize},
  error::Result,
};

/// A measured position with its uncertainty: standard deviations along each
/// axis, and the correlation between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertainPoint {
  pub x:       f64,
  pub y:       f64,
  pub sigma_x: f64,
  pub sigma_y: f64,
  pub rho_xy:  f64,
}

/// Horizontal and vertical error bars crossing at `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBars {
  pub center: Point,
  pub x:      Range,
  pub y:      Range,
}

impl UncertainPoint {
  pub const fn new(x: f64, y: f64, sigma_x: f64, sigma_y: f64, rho_xy: f64) -> Self {
    UncertainPoint { x, y, sigma_x, sigma_y, rho_xy }
  }

  /// A point with independent errors.
  pub const fn uncorrelated(x: f64, y: f64, sigma_x: f64, sigma_y: f64) -> Self {
    UncertainPoint::new(x, y, sigma_x, sigma_y, 0.0)
  }

  pub fn center(&self) -> Point { Point::new(self.x, self.y) }

  pub fn covariance(&self) -> Result<Covariance> {
    Covariance::from_sigmas(self.sigma_x, self.sigma_y, self.rho_xy)
  }

  pub fn ellipse(&self, options: &EllipseOptions) -> Result<EllipseDescriptor> {
    parameterize(&self.covariance()?, self.center(), options)
  }

  /// Error bars spanning `n_sigma` standard deviations on either side. The
  /// correlation is ignored.
  pub fn error_bars(&self, n_sigma: f64) -> ErrorBars {
    ErrorBars {
      center: self.center(),
      x:      Range::around(self.x, n_sigma * self.sigma_x.abs()),
      y:      Range::around(self.y, n_sigma * self.sigma_y.abs()),
    }
  }
}

impl ErrorBars {
  /// Both bars as line segments. When `cap` is non-zero, each end gets a
  /// perpendicular tick of that total length.
  pub fn to_path(&self, cap: f64) -> BezPath {
    let mut path = BezPath::new();
    let (cx, cy) = (self.center.x, self.center.y);

    path.move_to(Point::new(self.x.min, cy));
    path.line_to(Point::new(self.x.max, cy));
    path.move_to(Point::new(cx, self.y.min));
    path.line_to(Point::new(cx, self.y.max));

    if cap != 0.0 {
      let half = cap / 2.0;
      for x in [self.x.min, self.x.max] {
        path.move_to(Point::new(x, cy - half));
        path.line_to(Point::new(x, cy + half));
      }
      for y in [self.y.min, self.y.max] {
        path.move_to(Point::new(cx - half, y));
        path.line_to(Point::new(cx + half, y));
      }
    }

    path
  }
}
