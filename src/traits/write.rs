use core::convert::Infallible;

use alloc::{boxed::Box, collections::TryReserveError, vec::Vec};

use thiserror::Error;

/// Trait for writing bytes.
pub trait Write {
  type WriteError;
  type FlushError;

  /// Write the contents of `input_buffer` to the underlying device.
  /// Providing an empty `input_buffer` is valid and will return 0 bytes written.
  ///
  /// Returns the number of bytes written.
  /// If `sync_hint` is true, it indicates that the write should be flushed to the actual device.
  fn write(&mut self, input_buffer: &[u8], sync_hint: bool) -> Result<usize, Self::WriteError>;

  /// Flush any buffered data to the underlying device.
  /// Must be called at the end to ensure all data is written.
  fn flush(&mut self) -> Result<(), Self::FlushError>;
}

impl<W: Write + ?Sized> Write for &mut W {
  type WriteError = W::WriteError;
  type FlushError = W::FlushError;

  fn write(&mut self, input_buffer: &[u8], sync_hint: bool) -> Result<usize, Self::WriteError> {
    (**self).write(input_buffer, sync_hint)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    (**self).flush()
  }
}

impl<W: Write + ?Sized> Write for Box<W> {
  type WriteError = W::WriteError;
  type FlushError = W::FlushError;

  fn write(&mut self, input_buffer: &[u8], sync_hint: bool) -> Result<usize, Self::WriteError> {
    self.as_mut().write(input_buffer, sync_hint)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    self.as_mut().flush()
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SliceWriteError {
  #[error("Slice is not large enough to write the requested data of size {requested_size}")]
  SliceFull { requested_size: usize },
}

/// Write is implemented for `&mut [u8]` by copying into the slice, overwriting
/// its data.
///
/// Writing updates the slice to point to the yet unwritten part.
/// Once the slice is full, any non-empty write fails with [`SliceWriteError::SliceFull`].
impl Write for &mut [u8] {
  type WriteError = SliceWriteError;
  type FlushError = Infallible;

  fn write(&mut self, input_buffer: &[u8], _sync_hint: bool) -> Result<usize, Self::WriteError> {
    if self.is_empty() && !input_buffer.is_empty() {
      return Err(SliceWriteError::SliceFull {
        requested_size: input_buffer.len(),
      });
    }
    let amt = core::cmp::min(input_buffer.len(), self.len());
    let (a, b) = core::mem::take(self).split_at_mut(amt);

    a.copy_from_slice(&input_buffer[..amt]);

    *self = b;
    Ok(amt)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    Ok(())
  }
}

impl Write for Vec<u8> {
  type WriteError = TryReserveError;
  type FlushError = Infallible;

  fn write(&mut self, input_buffer: &[u8], _sync_hint: bool) -> Result<usize, Self::WriteError> {
    if input_buffer.is_empty() {
      return Ok(0);
    }
    self.try_reserve(input_buffer.len())?;
    let len = self.len();
    self.extend_from_slice(input_buffer);
    Ok(self.len() - len)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    Ok(())
  }
}
