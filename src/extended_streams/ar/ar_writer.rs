use zerocopy::IntoBytes as _;

use crate::{
  extended_streams::ar::{
    ar_constants::{ALIGNMENT_BYTE, AR_MAGIC},
    ArHeader, ArWriterError,
  },
  Write, WriteAll as _, WriteAllError,
};

/// Writes an archive member by member.
///
/// [`ArWriter::begin_member`] writes a header, after which exactly
/// `header.size` content bytes must be written through the [`Write`]
/// implementation. The alignment byte of odd sized members is written
/// automatically.
pub struct ArWriter<W: Write> {
  target_writer: W,
  /// Content bytes the current member still expects.
  remaining: u64,
  /// An alignment byte is owed once the current member is complete.
  pending_alignment: bool,
}

impl<W: Write> ArWriter<W> {
  /// Writes the archive magic and returns the writer.
  pub fn new(mut target_writer: W) -> Result<Self, WriteAllError<W::WriteError>> {
    target_writer.write_all(AR_MAGIC, false)?;
    Ok(Self {
      target_writer,
      remaining: 0,
      pending_alignment: false,
    })
  }

  /// Writes `header` and prepares the writer to accept `header.size` content bytes.
  ///
  /// Fails with [`ArWriterError::MemberNotComplete`] if the previous member was not fully written.
  pub fn begin_member(&mut self, header: &ArHeader) -> Result<(), ArWriterError<W::WriteError>> {
    if self.remaining > 0 {
      return Err(ArWriterError::MemberNotComplete {
        remaining: self.remaining,
      });
    }
    self.write_pending_alignment(false)?;

    let raw = header.encode()?;
    self.target_writer.write_all(raw.as_bytes(), false)?;

    self.remaining = header.size;
    self.pending_alignment = header.needs_alignment();
    Ok(())
  }

  /// Content bytes the current member still expects.
  #[must_use]
  pub fn remaining(&self) -> u64 {
    self.remaining
  }

  #[must_use]
  pub fn get_ref(&self) -> &W {
    &self.target_writer
  }

  /// Checks that the last member is complete and returns the underlying writer.
  ///
  /// An alignment byte left over from a failed write is written first. Does not flush.
  pub fn finish(mut self) -> Result<W, ArWriterError<W::WriteError>> {
    if self.remaining > 0 {
      return Err(ArWriterError::MemberNotComplete {
        remaining: self.remaining,
      });
    }
    self.write_pending_alignment(false)?;
    Ok(self.target_writer)
  }

  /// Writes the alignment byte once the current member is complete.
  ///
  /// Stays pending if the write fails, so a later call retries it.
  fn write_pending_alignment(
    &mut self,
    sync_hint: bool,
  ) -> Result<(), ArWriterError<W::WriteError>> {
    if self.remaining == 0 && self.pending_alignment {
      self.target_writer.write_all(&[ALIGNMENT_BYTE], sync_hint)?;
      self.pending_alignment = false;
    }
    Ok(())
  }

  /// Returns the underlying writer without checking the last member.
  #[must_use]
  pub fn into_inner(self) -> W {
    self.target_writer
  }
}

impl<W: Write> Write for ArWriter<W> {
  type WriteError = ArWriterError<W::WriteError>;
  type FlushError = W::FlushError;

  /// Writes content of the current member.
  ///
  /// Input beyond the declared size is not written: the part that fits is
  /// written and [`ArWriterError::WriteOverflow`] is returned.
  fn write(&mut self, input_buffer: &[u8], sync_hint: bool) -> Result<usize, Self::WriteError> {
    if input_buffer.is_empty() {
      return Ok(0);
    }

    let bytes_to_write = usize::try_from(self.remaining)
      .map_or(input_buffer.len(), |remaining| {
        remaining.min(input_buffer.len())
      });
    // `remaining` follows every chunk the target accepts, even if a later chunk fails.
    let mut bytes_written = 0;
    while bytes_written < bytes_to_write {
      match self
        .target_writer
        .write(&input_buffer[bytes_written..bytes_to_write], sync_hint)
      {
        Ok(0) => return Err(WriteAllError::ZeroWrite { bytes_written }.into()),
        Ok(n) => {
          bytes_written += n;
          self.remaining -= n as u64;
        },
        Err(e) => return Err(WriteAllError::Io(e).into()),
      }
    }

    self.write_pending_alignment(sync_hint)?;

    if bytes_to_write < input_buffer.len() {
      return Err(ArWriterError::WriteOverflow {
        bytes_written: bytes_to_write,
        bytes_rejected: input_buffer.len() - bytes_to_write,
      });
    }
    Ok(bytes_to_write)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    self.target_writer.flush()
  }
}
