use std::{io::Write, path::Path, rc::Rc};

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    error::{Axis, GribViewError, OutOfRangeError},
    export,
    record::{Grid, Record, position},
    render::{self, RenderOptions, RenderedMap},
    time,
};

/// Minimum and maximum coordinates of a parameter's axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// A read-only view of one selected parameter record.
///
/// Views are cheap to clone; clones share the decoded record.
#[derive(Debug, Clone)]
pub struct ParameterView {
    record: Rc<Record>,
}

impl From<Record> for ParameterView {
    fn from(record: Record) -> Self {
        Self::new(Rc::new(record))
    }
}

impl ParameterView {
    pub(crate) fn new(record: Rc<Record>) -> Self {
        Self { record }
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    /// Returns the distinct latitudes of the grid in ascending order.
    pub fn latitude_axis(&self) -> &[f64] {
        self.record.latitudes()
    }

    /// Returns the distinct longitudes of the grid in ascending order.
    pub fn longitude_axis(&self) -> &[f64] {
        self.record.longitudes()
    }

    /// Returns the grid of values, one row per latitude and one column per
    /// longitude, both in axis order.
    pub fn grid(&self) -> &Grid {
        self.record.grid()
    }

    /// Returns `(rows, cols)`, i.e. the lengths of the latitude and
    /// longitude axes.
    pub fn shape(&self) -> (usize, usize) {
        (self.grid().rows(), self.grid().cols())
    }

    pub fn num_masked(&self) -> usize {
        self.grid().cells().iter().filter(|c| c.is_none()).count()
    }

    pub fn extent(&self) -> Extent {
        let bounds = |axis: &[f64]| {
            (
                axis.first().copied().unwrap_or(f64::NAN),
                axis.last().copied().unwrap_or(f64::NAN),
            )
        };
        let (lat_min, lat_max) = bounds(self.latitude_axis());
        let (lon_min, lon_max) = bounds(self.longitude_axis());
        Extent {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Returns the minimum and maximum of the unmasked values, or `None` if
    /// every cell is masked.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.grid()
            .cells()
            .iter()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Returns the value at a grid coordinate; `Ok(None)` is a masked cell.
    ///
    /// Both coordinates must exactly match a value of their axis after
    /// rounding to [`COORDINATE_DECIMALS`](crate::COORDINATE_DECIMALS)
    /// places. There is no nearest-neighbour search.
    ///
    /// # Errors
    ///
    /// [`OutOfRangeError`] naming the first coordinate without a match.
    pub fn value_at(&self, lat: f64, lon: f64) -> Result<Option<f32>, GribViewError> {
        let row = position(self.latitude_axis(), lat).ok_or(OutOfRangeError {
            axis: Axis::Latitude,
            value: lat,
        })?;
        let col = position(self.longitude_axis(), lon).ok_or(OutOfRangeError {
            axis: Axis::Longitude,
            value: lon,
        })?;
        let cell = self.grid().get(row, col).ok_or(OutOfRangeError {
            axis: Axis::Latitude,
            value: lat,
        })?;
        Ok(cell)
    }

    /// Returns the date of data collection.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidDate`](crate::FormatError::InvalidDate) if the
    /// record's data date is not a valid `YYYYMMDD` date.
    pub fn collected_at(&self) -> Result<NaiveDate, GribViewError> {
        Ok(time::parse_data_date(self.record.data_date())?)
    }

    /// Returns the forecast offset in hours from the collection date.
    pub fn forecast_offset_hours(&self) -> i64 {
        self.record.forecast_hours()
    }

    /// Returns the collection date plus the forecast offset.
    pub fn forecast_datetime(&self) -> Result<NaiveDateTime, GribViewError> {
        let date = self.collected_at()?;
        Ok(time::add_forecast_offset(date, self.forecast_offset_hours())?)
    }

    /// Draws the grid over a Miller cylindrical projection bounded by the
    /// parameter's extent.
    pub fn render(&self, options: &RenderOptions) -> Result<RenderedMap, GribViewError> {
        render::render(self, options)
    }

    /// Writes the grid as a comma-delimited table to `path`.
    ///
    /// The file only appears at `path` once the whole table has been
    /// written; on failure nothing is left behind.
    pub fn export<P>(&self, path: P) -> Result<(), GribViewError>
    where
        P: AsRef<Path>,
    {
        export::export_to_path(self, path.as_ref())
    }

    /// Writes the same table as [`ParameterView::export`] to a writer.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<(), GribViewError> {
        export::write_table(self, writer)
    }
}
