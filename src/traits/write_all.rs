use thiserror::Error;

use crate::Write;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteAllError<U> {
  #[error("Underlying device wrote zero bytes after writing {bytes_written} bytes")]
  ZeroWrite { bytes_written: usize },
  #[error("Underlying write error: {0:?}")]
  Io(#[from] U),
}

/// Extension trait that provides a `write_all` method for any `Write` implementer.
///
/// The archive writer uses it for the magic and for each 60 byte member header,
/// which must land whole.
pub trait WriteAll: Write {
  /// Writes the entire buffer, retrying partial writes.
  ///
  /// Does not flush, but passes the `sync_hint` to the underlying `write` method.
  /// A target that accepts zero bytes fails with [`WriteAllError::ZeroWrite`] carrying
  /// how much of `input_buffer` had already been written.
  fn write_all(
    &mut self,
    input_buffer: &[u8],
    sync_hint: bool,
  ) -> Result<(), WriteAllError<Self::WriteError>> {
    let mut bytes_written = 0;
    while bytes_written < input_buffer.len() {
      match self.write(&input_buffer[bytes_written..], sync_hint) {
        Ok(0) => return Err(WriteAllError::ZeroWrite { bytes_written }),
        Ok(n) => bytes_written += n,
        Err(e) => return Err(WriteAllError::Io(e)),
      }
    }
    Ok(())
  }
}

/// Blanket implementation for all `Write` implementers.
impl<W: Write + ?Sized> WriteAll for W {}
