use thiserror::Error;

use crate::{Read, Write, WriteAll as _, WriteAllError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CopyError<RE, WE> {
  #[error("Underlying read error: {0:?}")]
  IoRead(RE),
  #[error("Underlying write error: {0:?}")]
  IoWrite(WriteAllError<WE>),
}

pub trait Copy: Read {
  /// Streams all bytes from the reader to the writer using a transfer buffer.
  ///
  /// This function continues until the reader returns 0 (EOF) or an error occurs.
  ///
  /// Returns the total number of bytes copied.
  fn copy<W: Write + ?Sized>(
    &mut self,
    writer: &mut W,
    transfer_buffer: &mut [u8],
    sync_hint: bool,
  ) -> Result<usize, CopyError<Self::ReadError, W::WriteError>> {
    let mut total_bytes = 0;

    loop {
      let bytes_read = self.read(transfer_buffer).map_err(CopyError::IoRead)?;
      if bytes_read == 0 {
        break; // EOF
      }

      writer
        .write_all(&transfer_buffer[..bytes_read], sync_hint)
        .map_err(CopyError::IoWrite)?;

      total_bytes += bytes_read;
    }

    Ok(total_bytes)
  }
}

/// Blanket implementation for all `Read` implementers.
impl<R: Read + ?Sized> Copy for R {}
