//! A command plus its data region, before addressing and control bytes are applied.

use std::fmt::{Debug, Formatter};

use crate::field::Field;
use crate::message_types::{CommandCode, FieldLabel};

#[derive(PartialEq, Eq, Clone)]
pub struct Message {
  pub command: CommandCode,
  pub fields: Vec<Field>,
}

impl Message {
  pub fn new(command: CommandCode) -> Self {
    Self { command, fields: vec![] }
  }

  pub fn with_field(mut self, label: FieldLabel, value: impl Into<String>) -> Self {
    self.fields.push(Field::new(label, value));
    self
  }

  pub fn field(&self, label: FieldLabel) -> Option<&str> {
    self.fields.iter()
        .find(|f| f.label == label)
        .map(|f| f.value.as_str())
  }

  /// Command code followed by every field in order, e.g. `0I|VN|T04|R101`.
  pub fn to_payload(&self) -> String {
    let mut payload = String::from(self.command.as_str());
    for field in &self.fields {
      payload.push_str(&field.to_string());
    }
    payload
  }
}

impl Debug for Message {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?} {}", self.command, self.to_payload())
  }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum IdentifierKind {
  Room,
  CommonDoor,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EncodeError {
  #[error("Address must be exactly two ASCII digits, got {0:?}")]
  InvalidAddress(String),

  #[error("Refusing to frame an empty command")]
  EmptyCommand,

  #[error("{kind:?} identifier {value:?} is out of range")]
  OutOfRangeIdentifier {
    kind: IdentifierKind,
    value: String,
  },

  #[error("{count} {kind:?} identifiers given, at most {max} are allowed")]
  TooManyIdentifiers {
    kind: IdentifierKind,
    count: usize,
    max: usize,
  },

  #[error("Guest name is {0} characters long, exceeds field limit")]
  NameTooLong(usize),

  #[error("Required field {0:?} would be empty")]
  MissingField(FieldLabel),

  #[error("Character {0:?} cannot be sent as ASCII")]
  UnsupportedCharacter(char),
}
