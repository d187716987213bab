use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime, Timelike};

/// The `yyyy` part is exactly four digits.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Check in/out time as carried by the `D` and `O` fields: `yyyymmddhhnn`, so
/// `200901141300` stands for 14 Jan 2009, 13:00.  Wall clock time, no zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProtocolDateTime {
  date_time: NaiveDateTime,
}

impl ProtocolDateTime {
  pub fn from_date_time(date_time: NaiveDateTime) -> Result<Self, ProtocolDateTimeError> {
    Self::try_from(date_time)
  }
}

impl TryFrom<NaiveDateTime> for ProtocolDateTime {
  type Error = ProtocolDateTimeError;

  fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
    if !YEAR_RANGE.contains(&value.year()) {
      return Err(ProtocolDateTimeError::YearOutOfRange(value.year()));
    }
    Ok(Self { date_time: value })
  }
}

impl Display for ProtocolDateTime {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let dt = &self.date_time;
    write!(
      f,
      "{:04}{:02}{:02}{:02}{:02}",
      dt.year(),
      dt.month(),
      dt.day(),
      dt.hour(),
      dt.minute())
  }
}

/// Formats an optional timestamp, yielding an empty string when it is absent or can't be
/// represented on the wire.
pub fn format_date_time(date_time: Option<NaiveDateTime>) -> String {
  date_time
      .and_then(|dt| ProtocolDateTime::try_from(dt).ok())
      .map(|dt| dt.to_string())
      .unwrap_or_default()
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProtocolDateTimeError {
  #[error("Year {0} cannot be encoded")]
  YearOutOfRange(i32),
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use super::*;

  fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
  }

  #[test]
  fn test_format_against_ref() {
    assert_eq!(format_date_time(Some(at(2009, 1, 14, 13, 0))), "200901141300");
  }

  #[test]
  fn test_zero_padding() {
    assert_eq!(format_date_time(Some(at(2024, 3, 5, 7, 9))), "202403050709");
    assert_eq!(format_date_time(Some(at(999, 12, 31, 23, 59))), "099912312359");
  }

  #[test]
  fn test_seconds_are_dropped() {
    let dt = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 59).unwrap();
    assert_eq!(format_date_time(Some(dt)), "202401011000");
  }

  #[test]
  fn test_absent_or_invalid() {
    assert_eq!(format_date_time(None), "");
    assert_eq!(format_date_time(Some(at(0, 1, 1, 0, 0))), "");
    assert_eq!(format_date_time(Some(at(-5, 1, 1, 0, 0))), "");
    assert_eq!(
      ProtocolDateTime::from_date_time(at(0, 6, 1, 0, 0)),
      Err(ProtocolDateTimeError::YearOutOfRange(0)));
  }

  #[test]
  fn test_five_digit_year_rejected() {
    assert_eq!(format_date_time(Some(at(9999, 12, 31, 23, 59))), "999912312359");
    assert_eq!(format_date_time(Some(at(10000, 1, 1, 0, 0))), "");
    assert_eq!(
      ProtocolDateTime::from_date_time(at(10000, 1, 1, 0, 0)),
      Err(ProtocolDateTimeError::YearOutOfRange(10000)));
  }
}
