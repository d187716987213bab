//! Framing: `<STX><dest><src><payload><ETX>` where both addresses are two ASCII digits.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::trace;

use crate::message::{EncodeError, Message};

pub const START_OF_MESSAGE: u8 = 0x02;
pub const END_OF_MESSAGE: u8 = 0x03;

/// Substituted for characters that have no single byte representation.
const REPLACEMENT_BYTE: u8 = b'?';

const MAX_ADDRESS: u8 = 99;

/// Two digit destination or source address.  Installations talk to `00`.
#[derive(Debug, Hash, PartialEq, Eq, Copy, Clone, Default)]
pub struct Address(u8);

impl Address {
  pub fn new(value: u8) -> Result<Self, EncodeError> {
    Self::try_from(value)
  }
}

impl TryFrom<u8> for Address {
  type Error = EncodeError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    if value > MAX_ADDRESS {
      return Err(EncodeError::InvalidAddress(value.to_string()));
    }
    Ok(Self(value))
  }
}

impl FromStr for Address {
  type Err = EncodeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(EncodeError::InvalidAddress(s.to_owned()));
    }
    let value = s.parse::<u8>()
        .map_err(|_| EncodeError::InvalidAddress(s.to_owned()))?;
    Ok(Self(value))
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:02}", self.0)
  }
}

/// Frames `payload`, or returns an empty buffer when there is nothing to frame.
pub fn assemble_frame(payload: &str, destination: Address, source: Address) -> Vec<u8> {
  if payload.is_empty() {
    return vec![];
  }
  let destination = destination.to_string();
  let source = source.to_string();
  let mut wrapped = Vec::with_capacity(2 + destination.len() + source.len() + payload.len());
  wrapped.push(START_OF_MESSAGE);
  wrapped.extend(encode_single_byte(&destination));
  wrapped.extend(encode_single_byte(&source));
  wrapped.extend(encode_single_byte(payload));
  wrapped.push(END_OF_MESSAGE);
  trace!("Assembled {} byte frame: {:?}", wrapped.len(), String::from_utf8_lossy(&wrapped));
  wrapped
}

/// Like [assemble_frame] but an empty payload is an error.
pub fn try_assemble_frame(payload: &str, destination: Address, source: Address) -> Result<Vec<u8>, EncodeError> {
  if payload.is_empty() {
    return Err(EncodeError::EmptyCommand);
  }
  Ok(assemble_frame(payload, destination, source))
}

/// One byte per character.  Latin-1 passes through as-is, anything wider becomes `?`.
fn encode_single_byte(s: &str) -> impl Iterator<Item = u8> + '_ {
  s.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT_BYTE))
}

#[derive(Debug, Default, Copy, Clone)]
pub struct FrameEncoder {
  destination: Address,
  source: Address,
}

impl FrameEncoder {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn set_destination(mut self, destination: Address) -> Self {
    self.destination = destination;
    self
  }

  pub fn set_source(mut self, source: Address) -> Self {
    self.source = source;
    self
  }

  pub fn destination(&self) -> Address {
    self.destination
  }

  pub fn source(&self) -> Address {
    self.source
  }

  pub fn encode(&self, message: &Message) -> Vec<u8> {
    assemble_frame(&message.to_payload(), self.destination, self.source)
  }
}

#[cfg(test)]
mod tests {
  use crate::message_types::{CommandCode, FieldLabel};
  use super::*;

  #[test]
  fn test_frame_against_ref() {
    let actual = assemble_frame("0B", Address::default(), Address::default());
    assert_eq!(actual, b"\x0200000B\x03");
  }

  #[test]
  fn test_addresses() {
    let actual = assemble_frame("0E", Address::new(12).unwrap(), "07".parse().unwrap());
    assert_eq!(actual, b"\x0212070E\x03");
  }

  #[test]
  fn test_empty_payload() {
    assert!(assemble_frame("", Address::default(), Address::default()).is_empty());
    assert_eq!(
      try_assemble_frame("", Address::default(), Address::default()),
      Err(EncodeError::EmptyCommand));
  }

  #[test]
  fn test_invalid_addresses() {
    for input in ["", "0", "000", "a1", " 1", "-1"] {
      assert_eq!(input.parse::<Address>(), Err(EncodeError::InvalidAddress(input.to_owned())));
    }
    assert_eq!(Address::new(100), Err(EncodeError::InvalidAddress("100".to_owned())));
    assert_eq!(Address::new(99).unwrap().to_string(), "99");
    assert_eq!(Address::new(5).unwrap().to_string(), "05");
  }

  #[test]
  fn test_single_byte_encoding() {
    let actual = assemble_frame("0I|NMäx €", Address::default(), Address::default());
    assert_eq!(actual, b"\x0200000I|NM\xe4x ?\x03");
  }

  #[test]
  fn test_encoder_uses_configured_addresses() {
    let encoder = FrameEncoder::new()
        .set_destination(Address::new(1).unwrap())
        .set_source(Address::new(2).unwrap());
    let message = Message::new(CommandCode::CheckIn).with_field(FieldLabel::RoomNumber, "5");
    assert_eq!(encoder.encode(&message), b"\x0201020I|R5\x03");
    assert_eq!(encoder.destination().to_string(), "01");
    assert_eq!(encoder.source().to_string(), "02");
  }
}
