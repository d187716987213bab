//! Command codes, field labels and the preset values carried in fields.
//!
//! Command codes are two ASCII characters.  Field labels are a single ASCII character and are
//! mapped through their byte value so that `num_derive` can do the lookup in both directions.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone)]
pub enum CommandCode {
  /// Guest check in, i.e. issue a card.  Also used to replace and duplicate.
  CheckIn,

  /// Guest check out, i.e. erase the card on the encoder.
  CheckOut,

  ReadCard,
}

impl CommandCode {
  pub fn as_str(&self) -> &'static str {
    match self {
      CommandCode::CheckIn => "0I",
      CommandCode::CheckOut => "0B",
      CommandCode::ReadCard => "0E",
    }
  }
}

impl Display for CommandCode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for CommandCode {
  type Err = CodeParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "0I" => Ok(CommandCode::CheckIn),
      "0B" => Ok(CommandCode::CheckOut),
      "0E" => Ok(CommandCode::ReadCard),
      _ => Err(CodeParseError::UnknownCommandCode(s.to_owned())),
    }
  }
}

#[derive(FromPrimitive, Debug, Hash, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum FieldLabel {
  /// Rooms the card opens.  Required on check in.
  RoomNumber = b'R',

  /// Start of the validity window.  Required on check in.
  ValidFrom = b'D',

  /// End of the validity window.  Required on check in.
  ValidTo = b'O',

  CardType = b'T',
  GuestName = b'N',
  CommonDoors = b'C',

  /// Unique card number, only ever seen in read-card responses.
  CardId = b'M',

  KeyRequest = b'V',
}

impl FieldLabel {
  pub fn as_char(&self) -> char {
    char::from(*self as u8)
  }
}

impl Display for FieldLabel {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

impl TryFrom<char> for FieldLabel {
  type Error = CodeParseError;

  fn try_from(value: char) -> Result<Self, Self::Error> {
    u8::try_from(value).ok()
        .and_then(FieldLabel::from_u8)
        .ok_or(CodeParseError::UnknownFieldLabel(value))
  }
}

#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
pub enum CardType {
  #[default]
  Guest,
  Master,
}

impl CardType {
  pub fn as_str(&self) -> &'static str {
    match self {
      CardType::Guest => "04",
      CardType::Master => "01",
    }
  }
}

impl Display for CardType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Whether the issued card invalidates every card previously issued for the same rooms.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum KeyRequestMode {
  /// Cancels any existing keys.
  New = b'N',

  /// Existing keys remain valid.
  Duplicate = b'D',
}

impl KeyRequestMode {
  pub fn as_char(&self) -> char {
    char::from(*self as u8)
  }
}

impl Display for KeyRequestMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_char())
  }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CodeParseError {
  #[error("Unknown command code: {0:?}")]
  UnknownCommandCode(String),

  #[error("Unknown field label: {0:?}")]
  UnknownFieldLabel(char),
}
