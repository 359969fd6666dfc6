use std::io::{self, ErrorKind};

use crate::{Read, Write};

/// Adapts a [`std::io::Read`] or [`std::io::Write`] implementer (a file, a socket, ...) to the crate's [`Read`] and [`Write`] traits.
///
/// Interrupted calls are retried.
#[derive(Debug, Default)]
pub struct StdStream<T> {
  inner: T,
}

impl<T> StdStream<T> {
  #[must_use]
  pub fn new(inner: T) -> Self {
    Self { inner }
  }

  #[must_use]
  pub fn get_ref(&self) -> &T {
    &self.inner
  }

  pub fn get_mut(&mut self) -> &mut T {
    &mut self.inner
  }

  #[must_use]
  pub fn into_inner(self) -> T {
    self.inner
  }
}

impl<T: io::Read> Read for StdStream<T> {
  type ReadError = io::Error;

  fn read(&mut self, output_buffer: &mut [u8]) -> Result<usize, Self::ReadError> {
    loop {
      match io::Read::read(&mut self.inner, output_buffer) {
        Err(e) if e.kind() == ErrorKind::Interrupted => {},
        result => return result,
      }
    }
  }
}

impl<T: io::Write> Write for StdStream<T> {
  type WriteError = io::Error;
  type FlushError = io::Error;

  fn write(&mut self, input_buffer: &[u8], sync_hint: bool) -> Result<usize, Self::WriteError> {
    let written = loop {
      match io::Write::write(&mut self.inner, input_buffer) {
        Err(e) if e.kind() == ErrorKind::Interrupted => {},
        result => break result?,
      }
    };
    if sync_hint {
      io::Write::flush(&mut self.inner)?;
    }
    Ok(written)
  }

  fn flush(&mut self) -> Result<(), Self::FlushError> {
    io::Write::flush(&mut self.inner)
  }
}
