use std::io::{self, Write};

use tempfile::NamedTempFile;

pub(crate) mod grib2;

pub(crate) fn write_to_tempfile(buf: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(buf)?;
    out.flush()?;
    Ok(out)
}

/// Concatenates messages into one file.
pub(crate) fn messages_to_tempfile(
    messages: &[grib2::MessageBuilder],
) -> Result<NamedTempFile, io::Error> {
    let buf: Vec<u8> = messages.iter().flat_map(|m| m.build()).collect();
    write_to_tempfile(&buf)
}

/// The file used in the walkthrough of the inspector: one "Wind speed" record
/// on a 2x2 grid with one masked cell.
pub(crate) fn wind_speed_message() -> grib2::MessageBuilder {
    grib2::MessageBuilder::new().wind_speed().grid(
        (10.0, 20.0),
        (100.0, 110.0),
        (2, 2),
        vec![Some(1.5), Some(2.5), Some(3.5), None],
    )
}
