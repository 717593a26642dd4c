use polars::prelude::*;

use crate::{
  error::{EllipseError, Result},
  point::UncertainPoint,
};

/// Names of the columns holding each field of an [`UncertainPoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
  pub x:   String,
  pub y:   String,
  pub sx:  String,
  pub sy:  String,
  pub pxy: String,
}

impl Default for ColumnNames {
  fn default() -> Self {
    ColumnNames {
      x:   "x".to_string(),
      y:   "y".to_string(),
      sx:  "sx".to_string(),
      sy:  "sy".to_string(),
      pxy: "pxy".to_string(),
    }
  }
}

impl ColumnNames {
  pub fn new() -> Self { ColumnNames::default() }

  pub fn x(mut self, name: &str) -> Self {
    self.x = name.to_string();
    self
  }
  pub fn y(mut self, name: &str) -> Self {
    self.y = name.to_string();
    self
  }
  pub fn sx(mut self, name: &str) -> Self {
    self.sx = name.to_string();
    self
  }
  pub fn sy(mut self, name: &str) -> Self {
    self.sy = name.to_string();
    self
  }
  pub fn pxy(mut self, name: &str) -> Self {
    self.pxy = name.to_string();
    self
  }

  /// In the order of the [`UncertainPoint`] fields.
  fn as_array(&self) -> [&str; 5] { [&self.x, &self.y, &self.sx, &self.sy, &self.pxy] }
}

/// Reads one point per row of `df`. A missing or non-numeric column fails the
/// whole read; a null cell only fails its own row.
pub fn read_points(df: &DataFrame, names: &ColumnNames) -> Result<Vec<Result<UncertainPoint>>> {
  let names = names.as_array();

  let selected = df
    .clone()
    .lazy()
    .select(names.map(|name| col(name).strict_cast(DataType::Float64)))
    .collect()?;

  let mut columns = Vec::with_capacity(names.len());
  for name in names {
    columns.push(selected.column(name)?.as_materialized_series().f64()?);
  }

  let rows = (0..selected.height())
    .map(|row| -> Result<UncertainPoint> {
      let mut values = [0.0; 5];
      for (i, column) in columns.iter().enumerate() {
        values[i] = column
          .get(row)
          .ok_or_else(|| EllipseError::MissingValue { column: names[i].to_string() })?;
      }

      let [x, y, sx, sy, pxy] = values;
      Ok(UncertainPoint::new(x, y, sx, sy, pxy))
    })
    .collect();

  Ok(rows)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_rows_in_order() {
    let df = df! {
      "x"   => &[0.0, 1.0, 2.0],
      "y"   => &[3.0, 4.0, 5.0],
      "sx"  => &[1.0, 0.5, 0.25],
      "sy"  => &[2.0, 1.0, 0.5],
      "pxy" => &[0.0, 0.1, -0.2],
    }
    .unwrap();

    let points: Vec<_> =
      read_points(&df, &ColumnNames::default()).unwrap().into_iter().map(|p| p.unwrap()).collect();

    assert_eq!(points, vec![
      UncertainPoint::new(0.0, 3.0, 1.0, 2.0, 0.0),
      UncertainPoint::new(1.0, 4.0, 0.5, 1.0, 0.1),
      UncertainPoint::new(2.0, 5.0, 0.25, 0.5, -0.2),
    ]);
  }

  #[test]
  fn casts_integer_columns() {
    let df = df! {
      "x"   => &[1i64, 2],
      "y"   => &[3i32, 4],
      "sx"  => &[1.0, 1.0],
      "sy"  => &[1.0, 1.0],
      "pxy" => &[0i64, 1],
    }
    .unwrap();

    let points = read_points(&df, &ColumnNames::default()).unwrap();
    assert_eq!(points[1].as_ref().unwrap(), &UncertainPoint::new(2.0, 4.0, 1.0, 1.0, 1.0));
  }

  #[test]
  fn null_cell_fails_its_row() {
    let df = df! {
      "x"   => &[Some(0.0), Some(1.0)],
      "y"   => &[Some(0.0), Some(1.0)],
      "sx"  => &[Some(1.0), None],
      "sy"  => &[Some(1.0), Some(1.0)],
      "pxy" => &[Some(0.0), Some(0.0)],
    }
    .unwrap();

    let points = read_points(&df, &ColumnNames::default()).unwrap();
    assert!(points[0].is_ok());
    match &points[1] {
      Err(EllipseError::MissingValue { column }) => assert_eq!(column, "sx"),
      other => panic!("expected a missing value, got {other:?}"),
    }
  }

  #[test]
  fn missing_column_fails_the_read() {
    let df = df! {
      "x" => &[0.0],
      "y" => &[0.0],
    }
    .unwrap();

    assert!(matches!(read_points(&df, &ColumnNames::default()), Err(EllipseError::Frame(_))));
  }

  #[test]
  fn unparsable_text_fails_the_read() {
    let df = df! {
      "x"   => &["0.0", "abc"],
      "y"   => &[0.0, 1.0],
      "sx"  => &[1.0, 1.0],
      "sy"  => &[1.0, 1.0],
      "pxy" => &[0.0, 0.0],
    }
    .unwrap();

    assert!(matches!(read_points(&df, &ColumnNames::default()), Err(EllipseError::Frame(_))));
  }

  #[test]
  fn renamed_columns() {
    let df = df! {
      "ra"    => &[10.0],
      "dec"   => &[-5.0],
      "e_ra"  => &[0.1],
      "e_dec" => &[0.2],
      "corr"  => &[0.5],
    }
    .unwrap();

    let names = ColumnNames::new().x("ra").y("dec").sx("e_ra").sy("e_dec").pxy("corr");
    let points = read_points(&df, &names).unwrap();
    assert_eq!(points[0].as_ref().unwrap(), &UncertainPoint::new(10.0, -5.0, 0.1, 0.2, 0.5));
  }
}
