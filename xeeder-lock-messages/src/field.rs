//! Data region formatting.  Each field is `|<label><value>`, and the value formatters below turn
//! typed inputs into the substrings the encoder accepts.  Formatters never fail: anything the
//! protocol can't carry is dropped or truncated.

use core::ops::RangeInclusive;
use std::fmt::{Display, Formatter};

use log::{debug, info};

use crate::message_types::FieldLabel;

pub const FIELD_SEPARATOR: char = '|';

pub const MAX_ROOM_NUMBERS: usize = 8;
pub const MAX_ROOM_NUMBER_DIGITS: usize = 5;
pub const ROOM_NUMBER_RANGE: RangeInclusive<i64> = 0 ..= 99999;
const ROOM_NUMBER_SEPARATOR: &str = ",";

pub const MAX_COMMON_DOORS: usize = 31;
pub const COMMON_DOOR_RANGE: RangeInclusive<i64> = 1 ..= 32;

/// Documented maximum length of the `N` field.
pub const GUEST_NAME_MAX_LENGTH: usize = 50;

/// Length names are actually cut to.  Existing installations have only ever seen 49, so that is
/// what we keep sending.
pub const GUEST_NAME_TRUNCATED_LENGTH: usize = GUEST_NAME_MAX_LENGTH - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
  pub label: FieldLabel,
  pub value: String,
}

impl Field {
  pub fn new(label: FieldLabel, value: impl Into<String>) -> Self {
    Self { label, value: value.into() }
  }
}

impl Display for Field {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{FIELD_SEPARATOR}{}{}", self.label, self.value)
  }
}

pub fn format_field(label: FieldLabel, value: &str) -> String {
  Field::new(label, value).to_string()
}

/// Room number exactly as the caller spelled it.  The encoder treats `01` and `1` as different
/// rooms, so the digits are kept as text and only checked numerically.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct RoomNumber(String);

impl RoomNumber {
  pub fn new(digits: impl Into<String>) -> Self {
    Self(digits.into())
  }

  /// Numeric value, or `None` unless the text is 1 to 5 ASCII digits.
  pub fn value(&self) -> Option<i64> {
    let digits = &self.0;
    if digits.is_empty()
        || digits.len() > MAX_ROOM_NUMBER_DIGITS
        || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    digits.parse::<i64>().ok()
        .filter(|v| ROOM_NUMBER_RANGE.contains(v))
  }

  pub fn is_valid(&self) -> bool {
    self.value().is_some()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<i64> for RoomNumber {
  fn from(value: i64) -> Self {
    Self(value.to_string())
  }
}

impl From<&str> for RoomNumber {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<String> for RoomNumber {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl Display for RoomNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Each room number is 1 to 5 digits, comma separated, at most 8 of them: `101,102,103`.
pub fn format_room_numbers(room_numbers: &[RoomNumber]) -> String {
  let candidates = &room_numbers[..room_numbers.len().min(MAX_ROOM_NUMBERS)];
  let kept: Vec<&str> = candidates.iter()
      .filter(|r| r.is_valid())
      .map(|r| r.as_str())
      .collect();
  if kept.len() != room_numbers.len() {
    debug!("Dropped {} of {} room numbers", room_numbers.len() - kept.len(), room_numbers.len());
  }
  kept.join(ROOM_NUMBER_SEPARATOR)
}

/// Each common door is two digits, no separator: `010809` opens doors 1, 8 and 9.
pub fn format_common_doors(doors: &[i64]) -> String {
  let candidates = &doors[..doors.len().min(MAX_COMMON_DOORS)];
  let kept: Vec<String> = candidates.iter()
      .filter(|d| COMMON_DOOR_RANGE.contains(*d))
      .map(|d| format!("{d:02}"))
      .collect();
  if kept.len() != doors.len() {
    debug!("Dropped {} of {} common doors", doors.len() - kept.len(), doors.len());
  }
  kept.concat()
}

pub fn format_guest_name(first_name: &str, second_name: &str) -> String {
  let full_name = format!("{first_name} {second_name}");
  let length = full_name.chars().count();
  if length > GUEST_NAME_TRUNCATED_LENGTH {
    info!("Guest name is {length} characters, truncating to {GUEST_NAME_TRUNCATED_LENGTH}");
    full_name.chars().take(GUEST_NAME_TRUNCATED_LENGTH).collect()
  } else {
    full_name
  }
}
