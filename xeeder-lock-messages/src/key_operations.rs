//! Card operations built on top of the check in, check out and read card commands.
//!
//! Issuing a card always sends the same seven fields in the same order; the create, replace and
//! duplicate operations only differ in the key request mode and in where the start of the
//! validity window comes from:
//!
//! | Operation | Key request | Valid from |
//! |-----------|-------------|------------|
//! | create    | new         | request    |
//! | replace   | new         | now        |
//! | duplicate | duplicate   | now        |

use chrono::{Local, NaiveDateTime};
use log::debug;

use crate::field::{format_common_doors, format_guest_name, format_room_numbers};
use crate::frame_encoder::FrameEncoder;
use crate::key_request::GuestKeyRequest;
use crate::message::{EncodeError, Message};
use crate::message_types::{CardType, CommandCode, FieldLabel, KeyRequestMode};
use crate::time::format_date_time;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ValidFromSource {
  /// Use [GuestKeyRequest::valid_from].
  Provided,

  /// Ignore the request and start the window at the time of the call.
  Now,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct IssueOptions {
  pub key_request: KeyRequestMode,
  pub valid_from: ValidFromSource,
  pub card_type: CardType,
}

impl IssueOptions {
  pub const CREATE: IssueOptions = IssueOptions {
    key_request: KeyRequestMode::New,
    valid_from: ValidFromSource::Provided,
    card_type: CardType::Guest,
  };

  pub const REPLACE: IssueOptions = IssueOptions {
    key_request: KeyRequestMode::New,
    valid_from: ValidFromSource::Now,
    card_type: CardType::Guest,
  };

  pub const DUPLICATE: IssueOptions = IssueOptions {
    key_request: KeyRequestMode::Duplicate,
    valid_from: ValidFromSource::Now,
    card_type: CardType::Guest,
  };

  pub fn set_card_type(mut self, card_type: CardType) -> Self {
    self.card_type = card_type;
    self
  }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Validation {
  /// Out of range identifiers are dropped, long names truncated and missing values sent empty.
  #[default]
  Permissive,

  /// Anything that would be dropped, truncated or left empty is an error instead.
  Strict,
}

/// Builds the check in message for `request`.  `now` is only consulted when the options ask for
/// the validity window to start at the time of the call.
pub fn issue_key_message(request: &GuestKeyRequest, options: &IssueOptions, now: NaiveDateTime) -> Message {
  let valid_from = match options.valid_from {
    ValidFromSource::Provided => request.valid_from,
    ValidFromSource::Now => Some(now),
  };
  Message::new(CommandCode::CheckIn)
      .with_field(FieldLabel::KeyRequest, options.key_request.to_string())
      .with_field(FieldLabel::CardType, options.card_type.as_str())
      .with_field(FieldLabel::RoomNumber, format_room_numbers(&request.rooms))
      .with_field(FieldLabel::ValidFrom, format_date_time(valid_from))
      .with_field(FieldLabel::ValidTo, format_date_time(request.valid_to))
      .with_field(FieldLabel::GuestName, format_guest_name(&request.first_name, &request.second_name))
      .with_field(FieldLabel::CommonDoors, format_common_doors(&request.common_doors))
}

fn now() -> NaiveDateTime {
  Local::now().naive_local()
}

pub fn issue_key(request: &GuestKeyRequest, options: &IssueOptions) -> Vec<u8> {
  FrameEncoder::new().encode(&issue_key_message(request, options, now()))
}

/// Issues a new card valid for the window in `request`, cancelling earlier cards.
pub fn create_key(request: &GuestKeyRequest) -> Vec<u8> {
  issue_key(request, &IssueOptions::CREATE)
}

/// Issues a new card valid from now, cancelling earlier cards.
pub fn replace_key(request: &GuestKeyRequest) -> Vec<u8> {
  issue_key(request, &IssueOptions::REPLACE)
}

/// Issues an additional card valid from now, leaving earlier cards working.
pub fn duplicate_key(request: &GuestKeyRequest) -> Vec<u8> {
  issue_key(request, &IssueOptions::DUPLICATE)
}

pub fn erase_key() -> Vec<u8> {
  FrameEncoder::new().encode(&Message::new(CommandCode::CheckOut))
}

pub fn read_key() -> Vec<u8> {
  FrameEncoder::new().encode(&Message::new(CommandCode::ReadCard))
}

/// Same operations as the free functions, but with configurable addressing and validation.
#[derive(Debug, Default, Copy, Clone)]
pub struct KeyEncoder {
  frame_encoder: FrameEncoder,
  validation: Validation,
}

impl KeyEncoder {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn set_frame_encoder(mut self, frame_encoder: FrameEncoder) -> Self {
    self.frame_encoder = frame_encoder;
    self
  }

  pub fn set_validation(mut self, validation: Validation) -> Self {
    self.validation = validation;
    self
  }

  pub fn validation(&self) -> Validation {
    self.validation
  }

  pub fn issue_key_at(
      &self,
      request: &GuestKeyRequest,
      options: &IssueOptions,
      now: NaiveDateTime,
  ) -> Result<Vec<u8>, EncodeError> {
    if self.validation == Validation::Strict {
      request.validate(options.valid_from)?;
    }
    let message = issue_key_message(request, options, now);
    debug!("Issuing {:?} card: {message:?}", options.key_request);
    Ok(self.frame_encoder.encode(&message))
  }

  pub fn issue_key(&self, request: &GuestKeyRequest, options: &IssueOptions) -> Result<Vec<u8>, EncodeError> {
    self.issue_key_at(request, options, now())
  }

  pub fn create_key(&self, request: &GuestKeyRequest) -> Result<Vec<u8>, EncodeError> {
    self.issue_key(request, &IssueOptions::CREATE)
  }

  pub fn replace_key(&self, request: &GuestKeyRequest) -> Result<Vec<u8>, EncodeError> {
    self.issue_key(request, &IssueOptions::REPLACE)
  }

  pub fn duplicate_key(&self, request: &GuestKeyRequest) -> Result<Vec<u8>, EncodeError> {
    self.issue_key(request, &IssueOptions::DUPLICATE)
  }

  pub fn erase_key(&self) -> Vec<u8> {
    self.frame_encoder.encode(&Message::new(CommandCode::CheckOut))
  }

  pub fn read_key(&self) -> Vec<u8> {
    self.frame_encoder.encode(&Message::new(CommandCode::ReadCard))
  }
}
