use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GribViewError {
    NotFound(NotFoundError),
    Format(FormatError),
    OutOfRange(OutOfRangeError),
    Io(String),
    Render(String),
}

impl Error for GribViewError {}

impl From<NotFoundError> for GribViewError {
    fn from(e: NotFoundError) -> Self {
        Self::NotFound(e)
    }
}

impl From<FormatError> for GribViewError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<OutOfRangeError> for GribViewError {
    fn from(e: OutOfRangeError) -> Self {
        Self::OutOfRange(e)
    }
}

impl From<io::Error> for GribViewError {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for GribViewError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<png::EncodingError> for GribViewError {
    fn from(e: png::EncodingError) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<grib::GribError> for GribViewError {
    fn from(e: grib::GribError) -> Self {
        Self::Format(FormatError::from(e))
    }
}

impl Display for GribViewError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotFound(e) => write!(f, "{e}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::OutOfRange(e) => write!(f, "{e}"),
            Self::Io(s) => write!(f, "I/O error: {s}"),
            Self::Render(s) => write!(f, "rendering failed: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotFoundError {
    File(PathBuf),
    Parameter(String),
    NoFileOpen,
    NoParameterSelected,
}

impl Error for NotFoundError {}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "no such file: {}", path.display()),
            Self::Parameter(name) => write!(f, "no such parameter: {name}"),
            Self::NoFileOpen => write!(f, "no GRIB file is open"),
            Self::NoParameterSelected => write!(f, "no parameter is selected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatError {
    NotGrib,
    UnsupportedEdition(u8),
    Empty,
    Decode(String),
    IrregularGrid {
        num_points: usize,
        num_lats: usize,
        num_lons: usize,
    },
    ShapeMismatch {
        rows: usize,
        cols: usize,
        num_cells: usize,
    },
    InvalidDate(String),
    UnsupportedTimeUnit(String),
}

impl Error for FormatError {}

impl From<grib::GribError> for FormatError {
    fn from(e: grib::GribError) -> Self {
        match e {
            grib::GribError::ParseError(grib::ParseError::NotGRIB) => Self::NotGrib,
            grib::GribError::ParseError(grib::ParseError::GRIBVersionMismatch(edition)) => {
                Self::UnsupportedEdition(edition)
            }
            e => Self::Decode(e.to_string()),
        }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotGrib => write!(f, "not GRIB data"),
            Self::UnsupportedEdition(i) => write!(f, "unsupported GRIB edition: {i}"),
            Self::Empty => write!(f, "empty GRIB data"),
            Self::Decode(s) => write!(f, "decoding failed: {s}"),
            Self::IrregularGrid {
                num_points,
                num_lats,
                num_lons,
            } => write!(
                f,
                "grid is not a regular lat/lon grid: {num_points} points over {num_lats} distinct latitudes and {num_lons} distinct longitudes"
            ),
            Self::ShapeMismatch {
                rows,
                cols,
                num_cells,
            } => write!(
                f,
                "grid shape does not match axes: {num_cells} cells for {rows} latitudes x {cols} longitudes"
            ),
            Self::InvalidDate(s) => write!(f, "invalid data date: {s}"),
            Self::UnsupportedTimeUnit(s) => write!(f, "unsupported forecast time unit: {s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutOfRangeError {
    pub axis: Axis,
    pub value: f64,
}

impl Error for OutOfRangeError {}

impl Display for OutOfRangeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} is not a grid coordinate of this parameter",
            self.axis, self.value
        )
    }
}
