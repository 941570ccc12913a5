use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::FormatError;

/// Parses a data date encoded as the 8-digit integer `YYYYMMDD`.
pub(crate) fn parse_data_date(data_date: u32) -> Result<NaiveDate, FormatError> {
    let digits = data_date.to_string();
    if digits.len() != 8 {
        return Err(FormatError::InvalidDate(digits));
    }
    NaiveDate::parse_from_str(&digits, "%Y%m%d").map_err(|_| FormatError::InvalidDate(digits))
}

/// Encodes a calendar date as the 8-digit integer `YYYYMMDD`.
///
/// Fields that do not form a real date with a four-digit year are a
/// [`FormatError::InvalidDate`].
pub(crate) fn data_date_from_ymd(year: u16, month: u8, day: u8) -> Result<u32, FormatError> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .filter(|_| (1000..=9999).contains(&year))
        .map(|_| u32::from(year) * 10_000 + u32::from(month) * 100 + u32::from(day))
        .ok_or_else(|| FormatError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

pub(crate) fn add_forecast_offset(
    date: NaiveDate,
    hours: i64,
) -> Result<NaiveDateTime, FormatError> {
    let start = date.and_time(NaiveTime::MIN);
    TimeDelta::try_hours(hours)
        .and_then(|offset| start.checked_add_signed(offset))
        .ok_or_else(|| FormatError::InvalidDate(format!("{date} {hours:+} hours")))
}
