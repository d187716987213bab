use std::io::Write;
use log::debug;
use crate::frame_encoder::FrameEncoder;
use crate::message::Message;

/// Frames messages onto any byte sink the caller owns (socket, serial port, stdout).
#[derive(Debug)]
pub struct FramedWriter<W> {
  raw_writer: W,
  frame_encoder: FrameEncoder,
}

impl<W: Write> FramedWriter<W> {
  pub fn new(raw_writer: W) -> Self {
    Self::with_encoder(raw_writer, FrameEncoder::new())
  }

  pub fn with_encoder(raw_writer: W, frame_encoder: FrameEncoder) -> Self {
    Self {
      raw_writer,
      frame_encoder,
    }
  }

  pub fn write(&mut self, message: &Message) -> anyhow::Result<()> {
    let encoded = self.frame_encoder.encode(message);
    self.write_frame(&encoded)
  }

  /// Writes an already assembled frame, e.g. one produced by the key operations.
  pub fn write_frame(&mut self, frame: &[u8]) -> anyhow::Result<()> {
    self.raw_writer.write_all(frame)?;
    self.raw_writer.flush()?;
    debug!("Wrote {} bytes...", frame.len());
    Ok(())
  }

  pub fn into_inner(self) -> W {
    self.raw_writer
  }
}
