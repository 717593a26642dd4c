use covellipse::{EllipseBuilder, ResultExt};
use polars::prelude::*;

fn main() -> PolarsResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  let df = df! {
    "x"   => &[1.0, 2.0, 3.0, 4.0, 5.0],
    "y"   => &[2.2, 2.5, 3.6, 4.7, 5.1],
    "sx"  => &[0.3, 0.2, 0.4, 0.1, 0.2],
    "sy"  => &[0.4, 0.1, 0.2, 0.3, 0.5],
    "pxy" => &[0.5, -0.2, 1.2, 0.0, 0.9],
  }?;

  let mut builder = EllipseBuilder::new();
  builder.n_sigma(2.0);

  let Some(report) = builder.build_frame(&df).log_err() else { return Ok(()) };

  for row in report.rows() {
    let e = row.ellipse;
    println!(
      "row {}: center=({}, {}) width={:.3} height={:.3} angle={:.1}",
      row.row, e.center.x, e.center.y, e.width, e.height, e.angle_degrees
    );
  }
  for failure in report.failures() {
    println!("{failure}");
  }

  let bounds = report.bounds().expand_by(0.1);
  println!(
    "x: {:.3}..{:.3}, y: {:.3}..{:.3}",
    bounds.x.min, bounds.x.max, bounds.y.min, bounds.y.max
  );

  Ok(())
}
