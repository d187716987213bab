//! Build Xeeder lock encoder frames from the command line and write them to stdout, e.g.
//!
//! ```text
//! lock-encoder create --valid-from 2024-01-01T10:00 --valid-to 2024-01-02T10:00 \
//!     --first-name Max --second-name Mustermann --room 101 --door 10 --door 12 | nc encoder 4001
//! ```

use std::io::stdout;

use chrono::NaiveDateTime;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::info;
use xeeder_lock_messages::error_code::{ErrorCode, ERROR_CODES};
use xeeder_lock_messages::field::RoomNumber;
use xeeder_lock_messages::frame_encoder::{Address, FrameEncoder};
use xeeder_lock_messages::framed_writer::FramedWriter;
use xeeder_lock_messages::key_operations::{IssueOptions, KeyEncoder, Validation};
use xeeder_lock_messages::key_request::GuestKeyRequest;
use xeeder_lock_messages::message_types::CardType;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Parser, Debug)]
pub struct Args {
  /// Destination address, two digits
  #[arg(short, long, default_value_t = Address::default())]
  pub destination: Address,

  /// Source address, two digits
  #[arg(short, long, default_value_t = Address::default())]
  pub source: Address,

  /// Reject out of range rooms/doors, long names and missing dates instead of dropping them
  #[arg(long, default_value_t = false)]
  pub strict: bool,

  /// How to write the frame to stdout
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
  pub format: OutputFormat,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
  /// Frame bytes exactly as they go on the wire
  Raw,

  /// Space separated hex bytes followed by a newline
  Hex,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CardTypeArg {
  Guest,
  Master,
}

impl From<CardTypeArg> for CardType {
  fn from(value: CardTypeArg) -> Self {
    match value {
      CardTypeArg::Guest => CardType::Guest,
      CardTypeArg::Master => CardType::Master,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Issue a new card for the given window, cancelling earlier cards
  Create {
    /// Start of the validity window (YYYY-MM-DDTHH:MM, local time)
    #[arg(long, value_parser = parse_date_time)]
    valid_from: NaiveDateTime,

    #[command(flatten)]
    guest: GuestArgs,
  },

  /// Issue a new card valid from now, cancelling earlier cards
  Replace {
    #[command(flatten)]
    guest: GuestArgs,
  },

  /// Issue an additional card valid from now
  Duplicate {
    #[command(flatten)]
    guest: GuestArgs,
  },

  /// Erase the card on the encoder (guest check out)
  Erase,

  /// Read the card on the encoder
  Read,

  /// Print the message for an encoder answer code, or the whole table
  ErrorCode {
    code: Option<String>,
  },
}

#[derive(ClapArgs, Debug)]
pub struct GuestArgs {
  /// End of the validity window (YYYY-MM-DDTHH:MM, local time)
  #[arg(long, value_parser = parse_date_time)]
  valid_to: NaiveDateTime,

  #[arg(long, default_value = "")]
  first_name: String,

  #[arg(long, default_value = "")]
  second_name: String,

  /// Room number (up to 5 digits, leading zeros are kept), repeat for up to 8 rooms
  #[arg(long = "room", value_parser = parse_room_number, allow_negative_numbers = true)]
  rooms: Vec<RoomNumber>,

  /// Common door number (1-32), repeat for several doors
  #[arg(long = "door", allow_negative_numbers = true)]
  doors: Vec<i64>,

  #[arg(long, value_enum, default_value_t = CardTypeArg::Guest)]
  card_type: CardTypeArg,
}

impl GuestArgs {
  fn to_request(&self, valid_from: Option<NaiveDateTime>) -> GuestKeyRequest {
    GuestKeyRequest {
      valid_from,
      valid_to: Some(self.valid_to),
      ..Default::default()
    }
        .set_guest_name(&self.first_name, &self.second_name)
        .set_room_numbers(self.rooms.iter().cloned())
        .set_common_doors(self.doors.iter().copied())
  }
}

/// Any text is accepted here so that out of range rooms reach the permissive/strict handling.
fn parse_room_number(s: &str) -> Result<RoomNumber, String> {
  Ok(RoomNumber::from(s))
}

fn parse_date_time(s: &str) -> Result<NaiveDateTime, String> {
  NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
      .map_err(|e| format!("Can't parse {s}: {e}"))
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let args = Args::parse();

  let frame_encoder = FrameEncoder::new()
      .set_destination(args.destination)
      .set_source(args.source);
  let validation = if args.strict { Validation::Strict } else { Validation::Permissive };
  let encoder = KeyEncoder::new()
      .set_frame_encoder(frame_encoder)
      .set_validation(validation);

  let frame = match &args.command {
    Command::Create { valid_from, guest } => {
      let options = IssueOptions::CREATE.set_card_type(guest.card_type.into());
      encoder.issue_key(&guest.to_request(Some(*valid_from)), &options)?
    }
    Command::Replace { guest } => {
      let options = IssueOptions::REPLACE.set_card_type(guest.card_type.into());
      encoder.issue_key(&guest.to_request(None), &options)?
    }
    Command::Duplicate { guest } => {
      let options = IssueOptions::DUPLICATE.set_card_type(guest.card_type.into());
      encoder.issue_key(&guest.to_request(None), &options)?
    }
    Command::Erase => encoder.erase_key(),
    Command::Read => encoder.read_key(),
    Command::ErrorCode { code } => return print_error_codes(code.as_deref()),
  };

  info!("Encoded {} byte frame", frame.len());
  match args.format {
    OutputFormat::Raw => FramedWriter::new(stdout().lock()).write_frame(&frame)?,
    OutputFormat::Hex => println!("{}", to_hex(&frame)),
  }
  Ok(())
}

fn print_error_codes(code: Option<&str>) -> anyhow::Result<()> {
  match code {
    Some(code) => {
      let parsed = code.parse::<ErrorCode>()?;
      println!("{parsed}");
    }
    None => {
      for code in ERROR_CODES.iter() {
        println!("{code}");
      }
    }
  }
  Ok(())
}

fn to_hex(frame: &[u8]) -> String {
  frame.iter()
      .map(|b| format!("{b:02X}"))
      .collect::<Vec<_>>()
      .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_create() {
    let args = Args::try_parse_from([
      "lock-encoder", "-d", "01", "--strict", "create",
      "--valid-from", "2024-01-01T10:00", "--valid-to", "2024-01-02T10:00",
      "--first-name", "Max", "--room", "01", "--room", "-1", "--door", "10",
    ]).unwrap();
    assert_eq!(args.destination.to_string(), "01");
    assert!(args.strict);
    match args.command {
      Command::Create { valid_from, guest } => {
        let request = guest.to_request(Some(valid_from));
        assert_eq!(request.rooms, vec![RoomNumber::from("01"), RoomNumber::from("-1")]);
        assert_eq!(request.rooms[0].value(), Some(1));
        assert_eq!(request.common_doors, vec![10]);
        assert_eq!(request.second_name, "");
      }
      other => panic!("Unexpected command {other:?}"),
    }
  }

  #[test]
  fn test_rejects_bad_address() {
    assert!(Args::try_parse_from(["lock-encoder", "-s", "1", "read"]).is_err());
  }

  #[test]
  fn test_hex() {
    assert_eq!(to_hex(b"\x0200000B\x03"), "02 30 30 30 30 30 42 03");
  }
}
