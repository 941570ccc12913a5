use std::{io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::{error::GribViewError, view::ParameterView};

pub const HEADER_CORNER: &str = "Latitude /Longitude";
pub const MASKED_CELL: &str = "--";

/// Writes the grid of `view` as a comma-delimited table.
///
/// The header row is [`HEADER_CORNER`] followed by the longitude axis; each
/// following row is one latitude followed by the values for every longitude,
/// with [`MASKED_CELL`] for masked cells. Rows and columns are in axis order.
pub(crate) fn write_table<W: Write>(view: &ParameterView, writer: W) -> Result<(), GribViewError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_writer(writer);

    let header = std::iter::once(HEADER_CORNER.to_owned())
        .chain(view.longitude_axis().iter().map(format_coordinate));
    csv.write_record(header)?;

    for (i, lat) in view.latitude_axis().iter().enumerate() {
        let cells = view.grid().row(i).unwrap_or_default();
        let row = std::iter::once(format_coordinate(lat)).chain(cells.iter().map(format_cell));
        csv.write_record(row)?;
    }

    csv.flush()?;
    Ok(())
}

pub(crate) fn export_to_path(view: &ParameterView, path: &Path) -> Result<(), GribViewError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    // dropping the temporary file on an error path removes it
    let mut out = NamedTempFile::new_in(dir)?;
    write_table(view, out.as_file_mut())?;
    out.as_file().sync_all()?;
    out.persist(path).map_err(|e| GribViewError::from(e.error))?;

    tracing::debug!(
        parameter = view.name(),
        path = %path.display(),
        "exported grid"
    );
    Ok(())
}

fn format_coordinate(value: &f64) -> String {
    format!("{value:?}")
}

fn format_cell(cell: &Option<f32>) -> String {
    match cell {
        Some(value) => format!("{value:?}"),
        None => MASKED_CELL.to_owned(),
    }
}
