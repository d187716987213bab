use chrono::NaiveDateTime;

use crate::field::{RoomNumber, COMMON_DOOR_RANGE, GUEST_NAME_TRUNCATED_LENGTH, MAX_COMMON_DOORS, MAX_ROOM_NUMBERS};
use crate::key_operations::ValidFromSource;
use crate::message::{EncodeError, IdentifierKind};
use crate::message_types::FieldLabel;
use crate::time::ProtocolDateTime;

/// Everything needed to issue a guest card.  Rooms keep the caller's digits and doors are signed
/// so that whatever the caller has on hand can be passed straight through; out of range values
/// are dropped or rejected depending on the encoder's validation mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestKeyRequest {
  pub valid_from: Option<NaiveDateTime>,
  pub valid_to: Option<NaiveDateTime>,
  pub first_name: String,
  pub second_name: String,
  pub rooms: Vec<RoomNumber>,
  pub common_doors: Vec<i64>,
}

impl GuestKeyRequest {
  pub fn new(valid_from: NaiveDateTime, valid_to: NaiveDateTime) -> Self {
    Self {
      valid_from: Some(valid_from),
      valid_to: Some(valid_to),
      ..Default::default()
    }
  }

  pub fn set_guest_name(mut self, first_name: &str, second_name: &str) -> Self {
    self.first_name = first_name.to_owned();
    self.second_name = second_name.to_owned();
    self
  }

  pub fn set_rooms(mut self, rooms: impl IntoIterator<Item = i64>) -> Self {
    self.rooms = rooms.into_iter().map(RoomNumber::from).collect();
    self
  }

  /// Rooms as text, e.g. `["01", "101"]`, sent with their leading zeros intact.
  pub fn set_room_numbers<R: Into<RoomNumber>>(mut self, rooms: impl IntoIterator<Item = R>) -> Self {
    self.rooms = rooms.into_iter().map(Into::into).collect();
    self
  }

  pub fn set_common_doors(mut self, common_doors: impl IntoIterator<Item = i64>) -> Self {
    self.common_doors = common_doors.into_iter().collect();
    self
  }

  /// Rejects anything the formatters would otherwise silently drop, truncate or leave empty.
  pub fn validate(&self, valid_from: ValidFromSource) -> Result<(), EncodeError> {
    self.validate_rooms()?;
    validate_common_doors(&self.common_doors)?;
    if valid_from == ValidFromSource::Provided {
      validate_date_time(FieldLabel::ValidFrom, self.valid_from)?;
    }
    validate_date_time(FieldLabel::ValidTo, self.valid_to)?;
    self.validate_guest_name()
  }

  fn validate_rooms(&self) -> Result<(), EncodeError> {
    let kind = IdentifierKind::Room;
    if self.rooms.is_empty() {
      return Err(EncodeError::MissingField(FieldLabel::RoomNumber));
    }
    if self.rooms.len() > MAX_ROOM_NUMBERS {
      return Err(EncodeError::TooManyIdentifiers { kind, count: self.rooms.len(), max: MAX_ROOM_NUMBERS });
    }
    match self.rooms.iter().find(|r| !r.is_valid()) {
      Some(room) => Err(EncodeError::OutOfRangeIdentifier { kind, value: room.to_string() }),
      None => Ok(()),
    }
  }

  fn validate_guest_name(&self) -> Result<(), EncodeError> {
    let full_name = format!("{} {}", self.first_name, self.second_name);
    if let Some(c) = full_name.chars().find(|c| !c.is_ascii()) {
      return Err(EncodeError::UnsupportedCharacter(c));
    }
    let length = full_name.chars().count();
    if length > GUEST_NAME_TRUNCATED_LENGTH {
      return Err(EncodeError::NameTooLong(length));
    }
    Ok(())
  }
}

fn validate_common_doors(doors: &[i64]) -> Result<(), EncodeError> {
  let kind = IdentifierKind::CommonDoor;
  if doors.len() > MAX_COMMON_DOORS {
    return Err(EncodeError::TooManyIdentifiers { kind, count: doors.len(), max: MAX_COMMON_DOORS });
  }
  match doors.iter().find(|d| !COMMON_DOOR_RANGE.contains(*d)) {
    Some(door) => Err(EncodeError::OutOfRangeIdentifier { kind, value: door.to_string() }),
    None => Ok(()),
  }
}

fn validate_date_time(label: FieldLabel, value: Option<NaiveDateTime>) -> Result<(), EncodeError> {
  value
      .and_then(|dt| ProtocolDateTime::try_from(dt).ok())
      .map(|_| ())
      .ok_or(EncodeError::MissingField(label))
}
