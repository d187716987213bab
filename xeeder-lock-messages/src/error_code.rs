//! Answer codes reported by the encoder: two numeric ASCII characters at the start of every
//! response.  Only the lookup table lives here, responses themselves are parsed elsewhere.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[derive(FromPrimitive, Debug, Hash, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum ErrorCode {
  Ok = 0,
  NoCard = 1,
  NoEncoderFound = 2,
  InvalidCard = 3,
  CardTypeError = 4,
  CardReadWriteError = 5,
  ComPortNotOpen = 6,
  ReadQueryCardOk = 7,
  InvalidParameter = 8,
  OperationNotSupported = 9,
  OtherError = 10,
  PortInUse = 11,
  CommunicationError = 12,
  CardNotEmpty = 13,
  UnknownCardEncryption = 14,
  OperationFailed = 15,
  UnknownError = 16,
  CardCountOverLimit = 17,
  InvalidRoomNumber = 18,
  SingleRoomNumberRequired = 19,
  EmptyCard = 20,
  NotGuestCard = 23,
}

/// Every code the encoder is known to send, in numeric order.
pub static ERROR_CODES: [ErrorCode; 22] = [
  ErrorCode::Ok,
  ErrorCode::NoCard,
  ErrorCode::NoEncoderFound,
  ErrorCode::InvalidCard,
  ErrorCode::CardTypeError,
  ErrorCode::CardReadWriteError,
  ErrorCode::ComPortNotOpen,
  ErrorCode::ReadQueryCardOk,
  ErrorCode::InvalidParameter,
  ErrorCode::OperationNotSupported,
  ErrorCode::OtherError,
  ErrorCode::PortInUse,
  ErrorCode::CommunicationError,
  ErrorCode::CardNotEmpty,
  ErrorCode::UnknownCardEncryption,
  ErrorCode::OperationFailed,
  ErrorCode::UnknownError,
  ErrorCode::CardCountOverLimit,
  ErrorCode::InvalidRoomNumber,
  ErrorCode::SingleRoomNumberRequired,
  ErrorCode::EmptyCard,
  ErrorCode::NotGuestCard,
];

impl ErrorCode {
  /// Two digit wire form, e.g. `"07"`.
  pub fn code(&self) -> String {
    format!("{:02}", *self as u8)
  }

  /// Message text exactly as the vendor documents it (typos included).
  pub fn message(&self) -> &'static str {
    match self {
      ErrorCode::Ok => "Ok",
      ErrorCode::NoCard => "No card",
      ErrorCode::NoEncoderFound => "No encoder found",
      ErrorCode::InvalidCard => "Invalid card",
      ErrorCode::CardTypeError => "Card type error",
      ErrorCode::CardReadWriteError => "Card read/write error",
      ErrorCode::ComPortNotOpen => "Com port is not open",
      ErrorCode::ReadQueryCardOk => "Read Query card ok",
      ErrorCode::InvalidParameter => "Invalid parameter",
      ErrorCode::OperationNotSupported => "Operating not support",
      ErrorCode::OtherError => "Other error",
      ErrorCode::PortInUse => "Port is in using",
      ErrorCode::CommunicationError => "Communication error",
      ErrorCode::CardNotEmpty => "Card is not empty, revoke it firstly",
      ErrorCode::UnknownCardEncryption => "Failed! Card Encryption is unknown",
      ErrorCode::OperationFailed => "Operating failed",
      ErrorCode::UnknownError => "Unknown error",
      ErrorCode::CardCountOverLimit => "Card count over limit",
      ErrorCode::InvalidRoomNumber => "Invalid room number",
      ErrorCode::SingleRoomNumberRequired => "Please input one room number",
      ErrorCode::EmptyCard => "Empty card",
      ErrorCode::NotGuestCard => "Not Guest Card",
    }
  }

  pub fn is_success(&self) -> bool {
    matches!(self, ErrorCode::Ok | ErrorCode::ReadQueryCardOk)
  }
}

impl Display for ErrorCode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.code(), self.message())
  }
}

impl TryFrom<u8> for ErrorCode {
  type Error = ErrorCodeParseError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    ErrorCode::from_u8(value)
        .ok_or_else(|| ErrorCodeParseError::UnknownErrorCode(format!("{value:02}")))
  }
}

impl FromStr for ErrorCode {
  type Err = ErrorCodeParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(ErrorCodeParseError::Malformed(s.to_owned()));
    }
    let raw = s.parse::<u8>()
        .map_err(|_| ErrorCodeParseError::Malformed(s.to_owned()))?;
    ErrorCode::try_from(raw)
  }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ErrorCodeParseError {
  #[error("Error code must be two ASCII digits, got {0:?}")]
  Malformed(String),

  #[error("Unknown error code {0}")]
  UnknownErrorCode(String),
}
