//! Conversion of submessages decoded by the `grib` crate into [`Record`]s.

use grib::{
    SectionBody, SubMessage,
    codetables::{Code, CodeTable4_2, Lookup, grib2::Table4_4},
};

use crate::{error::FormatError, record::Record, source::GribReader, time::data_date_from_ymd};

/// Returns the parameter name of a submessage, as listed in Code Table 4.2.
pub(crate) fn parameter_name(submessage: &SubMessage<'_, GribReader>) -> String {
    let prod_def = submessage.prod_def();
    let name = prod_def
        .parameter_category()
        .zip(prod_def.parameter_number())
        .map(|(c, n)| {
            CodeTable4_2::new(submessage.indicator().discipline, c)
                .lookup(usize::from(n))
                .to_string()
        });
    name.unwrap_or_else(|| {
        tracing::warn!("product definition carries no parameter; listing it without a name");
        String::new()
    })
}

/// Decodes the grid point values and coordinates of a submessage.
pub(crate) fn decode_record(
    name: &str,
    submessage: SubMessage<'_, GribReader>,
) -> Result<Record, FormatError> {
    let data_date = data_date(&submessage)?;
    let forecast_hours = forecast_hours(&submessage)?;
    let latlons = submessage.latlons()?;
    let latlons: Vec<(f32, f32)> = latlons.collect();

    let decoder = grib::Grib2SubmessageDecoder::from(submessage)?;
    let values = decoder.dispatch()?;
    let points: Vec<(f64, f64, f32)> = latlons
        .into_iter()
        .zip(values)
        .map(|((lat, lon), value)| (f64::from(lat), f64::from(lon), value))
        .collect();

    tracing::debug!(name, num_points = points.len(), "decoded submessage");
    Record::from_points(name, points, data_date, forecast_hours)
}

fn data_date(submessage: &SubMessage<'_, GribReader>) -> Result<u32, FormatError> {
    let Some(SectionBody::Section1(identification)) = &submessage.1.body.body else {
        return Err(FormatError::Decode(
            "Identification Section not found".to_owned(),
        ));
    };
    // octets 13-16 of Section 1 hold year (2 octets), month and day
    let payload: Vec<u8> = identification.iter().copied().collect();
    match payload.get(7..11) {
        Some(&[year_hi, year_lo, month, day]) => {
            data_date_from_ymd(u16::from_be_bytes([year_hi, year_lo]), month, day)
        }
        _ => Err(FormatError::Decode(
            "Identification Section is too short".to_owned(),
        )),
    }
}

fn forecast_hours(submessage: &SubMessage<'_, GribReader>) -> Result<i64, FormatError> {
    let Some(forecast_time) = submessage.prod_def().forecast_time() else {
        return Ok(0);
    };
    let value = i64::from(forecast_time.value);
    let unit = match &forecast_time.unit {
        Code::Name(unit) => Some(unit),
        Code::Num(_) => None,
    };
    hours_from_unit(unit, value)
        .ok_or_else(|| FormatError::UnsupportedTimeUnit(forecast_time.describe().0))
}

fn hours_from_unit(unit: Option<&Table4_4>, value: i64) -> Option<i64> {
    let hours = match unit? {
        Table4_4::Second => value / 3600,
        Table4_4::Minute => value / 60,
        Table4_4::Hour => value,
        Table4_4::ThreeHours => value * 3,
        Table4_4::SixHours => value * 6,
        Table4_4::TwelveHours => value * 12,
        Table4_4::Day => value * 24,
        _ => return None,
    };
    Some(hours)
}
