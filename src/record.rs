use std::cmp::Ordering;

use crate::error::FormatError;

/// Number of decimal places kept when coordinates are materialised into
/// axes. Queries are rounded the same way before they are compared.
pub const COORDINATE_DECIMALS: i32 = 4;

/// Rounds a coordinate in degrees to [`COORDINATE_DECIMALS`] places.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10_f64.powi(COORDINATE_DECIMALS);
    let rounded = (value * factor).round() / factor;
    // normalizes -0.0
    rounded + 0.0
}

/// A 2D grid of cells in row-major order, one row per latitude.
///
/// `None` marks a masked cell, i.e. a grid point without a genuine
/// measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<f32>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, cells: Vec<Option<f32>>) -> Result<Self, FormatError> {
        if rows * cols != cells.len() {
            return Err(FormatError::ShapeMismatch {
                rows,
                cols,
                num_cells: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Builds a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Option<f32>>>) -> Result<Self, FormatError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map(Vec::len).unwrap_or(0);
        let cells: Vec<_> = rows.into_iter().flatten().collect();
        Self::new(num_rows, num_cols, cells)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Option<f32>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[Option<f32>]> {
        let start = row.checked_mul(self.cols)?;
        self.cells.get(start..start + self.cols)
    }

    pub fn cells(&self) -> &[Option<f32>] {
        &self.cells
    }
}

/// One decoded parameter record of a GRIB file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    grid: Grid,
    data_date: u32,
    forecast_hours: i64,
}

impl Record {
    /// Creates a record from axes and a grid indexed by `(latitude position,
    /// longitude position)`.
    ///
    /// Axis values are rounded to [`COORDINATE_DECIMALS`] places and must be
    /// strictly ascending after rounding.
    pub fn new(
        name: impl Into<String>,
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
        grid: Grid,
        data_date: u32,
        forecast_hours: i64,
    ) -> Result<Self, FormatError> {
        let latitudes = materialize_axis(latitudes);
        let longitudes = materialize_axis(longitudes);
        let ascending = |axis: &[f64]| axis.windows(2).all(|w| w[0] < w[1]);
        if grid.rows() != latitudes.len()
            || grid.cols() != longitudes.len()
            || !ascending(&latitudes)
            || !ascending(&longitudes)
        {
            return Err(FormatError::ShapeMismatch {
                rows: latitudes.len(),
                cols: longitudes.len(),
                num_cells: grid.cells().len(),
            });
        }
        Ok(Self {
            name: name.into(),
            latitudes,
            longitudes,
            grid,
            data_date,
            forecast_hours,
        })
    }

    /// Creates a record from grid points in any order, as a decoder yields
    /// them. Non-finite values become masked cells.
    ///
    /// The distinct latitudes and longitudes of the points must span the
    /// whole point set, i.e. the points have to form a regular lat/lon grid.
    pub fn from_points<I>(
        name: impl Into<String>,
        points: I,
        data_date: u32,
        forecast_hours: i64,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (f64, f64, f32)>,
    {
        let points: Vec<_> = points
            .into_iter()
            .map(|(lat, lon, value)| (round_coordinate(lat), round_coordinate(lon), value))
            .collect();
        let latitudes = distinct_sorted(points.iter().map(|(lat, _, _)| *lat));
        let longitudes = distinct_sorted(points.iter().map(|(_, lon, _)| *lon));

        if latitudes.len() * longitudes.len() != points.len() {
            return Err(FormatError::IrregularGrid {
                num_points: points.len(),
                num_lats: latitudes.len(),
                num_lons: longitudes.len(),
            });
        }

        let cols = longitudes.len();
        let mut cells = vec![None; latitudes.len() * cols];
        for (lat, lon, value) in points {
            // both searches succeed since the axes were built from the points
            let (Some(row), Some(col)) = (position(&latitudes, lat), position(&longitudes, lon))
            else {
                continue;
            };
            cells[row * cols + col] = value.is_finite().then_some(value);
        }
        let grid = Grid::new(latitudes.len(), cols, cells)?;

        Ok(Self {
            name: name.into(),
            latitudes,
            longitudes,
            grid,
            data_date,
            forecast_hours,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Data date as the integer `YYYYMMDD`.
    pub fn data_date(&self) -> u32 {
        self.data_date
    }

    pub fn forecast_hours(&self) -> i64 {
        self.forecast_hours
    }
}

/// Returns the position of `value` in an ascending axis, comparing after
/// coordinate rounding.
pub(crate) fn position(axis: &[f64], value: f64) -> Option<usize> {
    let value = round_coordinate(value);
    axis.binary_search_by(|v| v.total_cmp(&value)).ok()
}

/// Returns the position of the axis value closest to `value`.
pub(crate) fn nearest_position(axis: &[f64], value: f64) -> Option<usize> {
    match axis.binary_search_by(|v| v.partial_cmp(&value).unwrap_or(Ordering::Less)) {
        Ok(i) => Some(i),
        Err(0) => (!axis.is_empty()).then_some(0),
        Err(i) if i == axis.len() => Some(i - 1),
        Err(i) => {
            if (value - axis[i - 1]).abs() <= (axis[i] - value).abs() {
                Some(i - 1)
            } else {
                Some(i)
            }
        }
    }
}

fn materialize_axis(axis: Vec<f64>) -> Vec<f64> {
    axis.into_iter().map(round_coordinate).collect()
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<_> = values.collect();
    values.sort_unstable_by(f64::total_cmp);
    values.dedup();
    values
}
