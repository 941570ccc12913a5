use std::io::{self, Write};

use tempfile::NamedTempFile;

use super::{grib2::MessageBuilder, write_to_tempfile};

#[inline]
pub(crate) fn empty_file() -> Result<NamedTempFile, io::Error> {
    NamedTempFile::new()
}

pub(crate) fn non_grib_file() -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(b"foo foo foo foo foo foo foo foo ")?;

    Ok(out)
}

pub(crate) fn grib1_file() -> Result<NamedTempFile, io::Error> {
    write_to_tempfile(&super::grib2::grib1_header())
}

pub(crate) fn wind_speed_message() -> MessageBuilder {
    MessageBuilder::new().wind_speed().grid(
        (10.0, 20.0),
        (100.0, 110.0),
        (2, 2),
        vec![Some(1.5), Some(2.5), Some(3.5), None],
    )
}

/// One "Wind speed" record on a 2x2 grid with one masked cell.
pub(crate) fn wind_speed() -> Result<NamedTempFile, io::Error> {
    write_to_tempfile(&wind_speed_message().build())
}

pub(crate) fn wind_speed_bytes() -> Vec<u8> {
    wind_speed_message().build()
}

/// Three records, two of which share the name "Temperature".
pub(crate) fn multi_parameter() -> Result<NamedTempFile, io::Error> {
    let messages = [
        MessageBuilder::new().temperature().grid(
            (-10.0, 10.0),
            (0.0, 10.0),
            (2, 2),
            vec![Some(280.0), Some(281.0), Some(282.0), Some(283.0)],
        ),
        MessageBuilder::new().wave_height().grid(
            (30.0, 20.0),
            (140.0, 150.0),
            (2, 2),
            vec![Some(2.0), Some(3.0), None, Some(1.0)],
        ),
        MessageBuilder::new()
            .temperature()
            .forecast(super::grib2::unit::HOUR, 6)
            .grid(
                (-10.0, 10.0),
                (0.0, 10.0),
                (2, 2),
                vec![Some(290.0), Some(291.0), Some(292.0), Some(293.0)],
            ),
    ];
    let buf: Vec<u8> = messages.iter().flat_map(|m| m.build()).collect();
    write_to_tempfile(&buf)
}

/// Two records, the first of which carries a reference date with an
/// impossible month and cannot be decoded.
pub(crate) fn with_undecodable_record() -> Result<NamedTempFile, io::Error> {
    let messages = [
        MessageBuilder::new().temperature().reference_date(2024, 112, 1),
        wind_speed_message(),
    ];
    let buf: Vec<u8> = messages.iter().flat_map(|m| m.build()).collect();
    write_to_tempfile(&buf)
}
