//! Command encoder for the Xeeder Hotel Lock System Interface, the ASCII protocol spoken by
//! Xeeder card encoders over TCP or a serial line.
//!
//! Frames look like `<STX>DDSS<cmd>|<label><value>...<ETX>` and are handed off to whatever
//! transport the caller owns.  Nothing in here opens sockets or parses responses.

pub mod message;
pub mod message_types;
pub mod error_code;
pub mod field;
pub mod time;
pub mod frame_encoder;
pub mod framed_writer;
pub mod key_request;
pub mod key_operations;
