use kurbo::{Affine, Point};

/// An axis-aligned box in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

/// A closed interval. `min` may be greater than `max` for flipped viewports,
/// such as a y axis that grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Default for Bounds {
  fn default() -> Self { Bounds::empty() }
}

impl Bounds {
  pub const fn empty() -> Self { Bounds { x: Range::empty(), y: Range::empty() } }
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  /// Bounds of a single point, with zero size.
  pub const fn point(p: Point) -> Self {
    Bounds { x: Range::new(p.x, p.x), y: Range::new(p.y, p.y) }
  }

  pub fn is_empty(&self) -> bool { self.x.is_empty() || self.y.is_empty() }

  pub fn width(&self) -> f64 { self.x.size() }
  pub fn height(&self) -> f64 { self.y.size() }

  pub fn center(&self) -> Point { Point::new(self.x.center(), self.y.center()) }

  pub const fn shrink(self, amount: f64) -> Self {
    Bounds { x: self.x.shrink(amount), y: self.y.shrink(amount) }
  }

  pub const fn expand(self, amount: f64) -> Self {
    Bounds { x: self.x.expand(amount), y: self.y.expand(amount) }
  }
  pub const fn expand_by(self, fract: f64) -> Self {
    Bounds { x: self.x.expand_by(fract), y: self.y.expand_by(fract) }
  }

  pub fn contains(&self, p: Point) -> bool { self.x.contains(&p.x) && self.y.contains(&p.y) }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  /// Maps these data bounds onto `viewport`. A zero-sized axis keeps a unit
  /// scale, and is centered in the viewport.
  pub fn transform_to(&self, viewport: Bounds) -> Affine {
    fn axis(data: Range, view: Range) -> (f64, f64) {
      if data.size() == 0.0 {
        (1.0, view.center() - data.min)
      } else {
        let scale = view.size() / data.size();
        (scale, view.min - data.min * scale)
      }
    }

    let (scale_x, translate_x) = axis(self.x, viewport.x);
    let (scale_y, translate_y) = axis(self.y, viewport.y);

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl FromIterator<Bounds> for Bounds {
  fn from_iter<I: IntoIterator<Item = Bounds>>(iter: I) -> Self {
    iter.into_iter().fold(Bounds::empty(), |a, b| a.union(b))
  }
}

impl Default for Range {
  fn default() -> Self { Range::empty() }
}

impl Range {
  pub const fn empty() -> Self { Range { min: f64::INFINITY, max: f64::NEG_INFINITY } }
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }

  /// A range of `radius` on either side of `center`.
  pub const fn around(center: f64, radius: f64) -> Self {
    Range { min: center - radius, max: center + radius }
  }

  pub const fn is_empty(&self) -> bool {
    self.min == f64::INFINITY && self.max == f64::NEG_INFINITY
  }
  pub const fn size(&self) -> f64 { if self.is_empty() { 0.0 } else { self.max - self.min } }
  pub const fn center(&self) -> f64 { (self.min + self.max) / 2.0 }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    if self.is_empty() {
      return self;
    }
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    if self.is_empty() {
      other
    } else if other.is_empty() {
      *self
    } else {
      Range { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn union_skips_empty() {
    let a = Range::new(1.0, 2.0);
    assert_eq!(Range::empty().union(a), a);
    assert_eq!(a.union(Range::empty()), a);
    assert_eq!(a.union(Range::new(-1.0, 1.5)), Range::new(-1.0, 2.0));
  }

  #[test]
  fn zero_size_ranges_still_union() {
    let a = Range::new(3.0, 3.0);
    let b = Range::new(5.0, 5.0);
    assert_eq!(a.union(b), Range::new(3.0, 5.0));
  }

  #[test]
  fn collect_bounds() {
    let bounds: Bounds = [Bounds::point(Point::new(1.0, 2.0)), Bounds::point(Point::new(-1.0, 4.0))]
      .into_iter()
      .collect();

    assert_eq!(bounds, Bounds::new(Range::new(-1.0, 1.0), Range::new(2.0, 4.0)));
    assert!(bounds.contains(Point::new(0.0, 3.0)));
    assert!(!bounds.contains(Point::new(0.0, 5.0)));
    assert_eq!(bounds.center(), Point::new(0.0, 3.0));
  }

  #[test]
  fn expand_flipped_range() {
    let r = Range::new(10.0, 0.0).shrink(1.0);
    assert_eq!(r, Range::new(9.0, 1.0));
  }

  #[test]
  fn transform_maps_corners() {
    let data = Bounds::new(Range::new(0.0, 10.0), Range::new(0.0, 5.0));
    let viewport = Bounds::new(Range::new(0.0, 1000.0), Range::new(1000.0, 0.0));
    let t = data.transform_to(viewport);

    assert_eq!(t * Point::new(0.0, 0.0), Point::new(0.0, 1000.0));
    assert_eq!(t * Point::new(10.0, 5.0), Point::new(1000.0, 0.0));
  }

  #[test]
  fn transform_centers_flat_axis() {
    let data = Bounds::new(Range::new(2.0, 2.0), Range::new(0.0, 1.0));
    let viewport = Bounds::new(Range::new(0.0, 100.0), Range::new(0.0, 100.0));
    let t = data.transform_to(viewport);

    assert_eq!((t * Point::new(2.0, 0.0)).x, 50.0);
  }
}
