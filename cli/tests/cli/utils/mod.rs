use std::io::{self, Write};

use tempfile::NamedTempFile;

#[path = "../../../../tests/utils/grib2.rs"]
pub(crate) mod grib2;
pub(crate) mod testdata;

pub(crate) fn write_to_tempfile(buf: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(buf)?;
    out.flush()?;
    Ok(out)
}
