use chrono::{NaiveDate, NaiveDateTime};
use log::LevelFilter;
use xeeder_lock_messages::error_code::ErrorCode;
use xeeder_lock_messages::frame_encoder::{assemble_frame, Address, FrameEncoder, END_OF_MESSAGE, START_OF_MESSAGE};
use xeeder_lock_messages::framed_writer::FramedWriter;
use xeeder_lock_messages::key_operations::{create_key, duplicate_key, erase_key, read_key, replace_key, IssueOptions, KeyEncoder, Validation};
use xeeder_lock_messages::key_request::GuestKeyRequest;
use xeeder_lock_messages::message::{EncodeError, IdentifierKind};

fn init_logging() {
  let _ = env_logger::builder().filter_level(LevelFilter::Trace).is_test(true).try_init();
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn max_mustermann() -> GuestKeyRequest {
  GuestKeyRequest::new(at(2024, 1, 1, 10, 0), at(2024, 1, 2, 10, 0))
      .set_guest_name("Max", "Mustermann")
      .set_rooms([101])
      .set_common_doors([10, 12])
}

#[test]
fn create_key_end_to_end() {
  init_logging();

  let mut expected = vec![0x02];
  expected.extend_from_slice(b"0000");
  expected.extend_from_slice(b"0I");
  for field in ["|VN", "|T04", "|R101", "|D202401011000", "|O202401021000", "|NMax Mustermann", "|C1012"] {
    expected.extend_from_slice(field.as_bytes());
  }
  expected.push(0x03);

  assert_eq!(create_key(&max_mustermann()), expected);
}

#[test]
fn room_numbers_sent_as_given() {
  init_logging();

  let frame = create_key(&max_mustermann().set_room_numbers(["01", "101"]));
  assert!(frame.windows(8).any(|w| w == b"|R01,101"), "leading zero lost in {frame:?}");
  assert_eq!(frame, create_key(&max_mustermann().set_room_numbers(["01".to_owned(), "101".to_owned()])));
}

#[test]
fn every_frame_has_single_start_and_end() {
  init_logging();

  let request = max_mustermann().set_rooms([1, 2, 3]);
  let frames = [
    create_key(&request),
    replace_key(&request),
    duplicate_key(&request),
    erase_key(),
    read_key(),
  ];
  for frame in frames {
    assert_eq!(frame.first(), Some(&START_OF_MESSAGE));
    assert_eq!(frame.last(), Some(&END_OF_MESSAGE));
    assert_eq!(frame.iter().filter(|b| **b == START_OF_MESSAGE).count(), 1);
    assert_eq!(frame.iter().filter(|b| **b == END_OF_MESSAGE).count(), 1);
    assert!(!frame.windows(2).any(|w| w == b"||"), "duplicated separator in {frame:?}");
    assert!(frame[1..5].iter().all(|b| b.is_ascii_digit()));
  }
}

#[test]
fn deterministic_builders_are_idempotent() {
  init_logging();

  let encoder = KeyEncoder::new();
  let now = at(2025, 2, 3, 4, 5);
  for options in [IssueOptions::CREATE, IssueOptions::REPLACE, IssueOptions::DUPLICATE] {
    let first = encoder.issue_key_at(&max_mustermann(), &options, now).unwrap();
    let second = encoder.issue_key_at(&max_mustermann(), &options, now).unwrap();
    assert_eq!(first, second);
  }
  assert_eq!(create_key(&max_mustermann()), create_key(&max_mustermann()));
}

#[test]
fn erase_and_read_are_fixed_frames() {
  assert_eq!(erase_key(), b"\x0200000B\x03");
  assert_eq!(read_key(), b"\x0200000E\x03");
  assert_eq!(erase_key().len(), 8);
  assert_eq!(read_key().len(), 8);
}

#[test]
fn empty_payload_is_degenerate() {
  assert!(assemble_frame("", Address::default(), Address::default()).is_empty());
}

#[test]
fn strict_mode_reports_first_problem() {
  init_logging();

  let encoder = KeyEncoder::new().set_validation(Validation::Strict);
  let request = max_mustermann().set_common_doors([1, 8, 99]);
  assert_eq!(
    encoder.create_key(&request),
    Err(EncodeError::OutOfRangeIdentifier { kind: IdentifierKind::CommonDoor, value: "99".to_owned() }));

  let permissive = KeyEncoder::new().create_key(&request).unwrap();
  assert!(permissive.ends_with(b"|C0108\x03"));
}

#[test]
fn framed_writer_sends_key_frames() -> anyhow::Result<()> {
  init_logging();

  let frame_encoder = FrameEncoder::new().set_destination("01".parse()?);
  let encoder = KeyEncoder::new().set_frame_encoder(frame_encoder);

  let mut writer = FramedWriter::with_encoder(Vec::new(), frame_encoder);
  writer.write_frame(&encoder.erase_key())?;
  writer.write_frame(&encoder.create_key(&max_mustermann())?)?;

  let written = writer.into_inner();
  assert!(written.starts_with(b"\x0201000B\x03\x0201000I|VN|T04|R101"));
  Ok(())
}

#[test]
fn error_codes_are_looked_up() {
  assert_eq!("07".parse::<ErrorCode>().map(|c| c.message()), Ok("Read Query card ok"));
  assert_eq!("18".parse::<ErrorCode>().map(|c| c.message()), Ok("Invalid room number"));
}
