use crate::{
  extended_streams::ar::{
    ar_constants::{ArHeaderRaw, AR_MAGIC, HEADER_SIZE},
    ArHeader, ArReaderError, ArReaderOptions, ArViolationHandler, IgnoreArViolationHandler,
  },
  Read, ReadAll as _, ReadAllError,
};

/// Provides sequential access to the members of an archive.
///
/// [`ArReader::next_member`] advances to the next member, including the first.
/// The member's content is then read through the [`Read`] implementation,
/// which reports EOF at the end of the member.
pub struct ArReader<R: Read, VH: ArViolationHandler = IgnoreArViolationHandler> {
  source_reader: R,
  /// Content bytes of the current member that have not been read yet.
  remaining: u64,
  /// An alignment byte follows the current member.
  pending_alignment: bool,
  violation_handler: VH,
  options: ArReaderOptions,
}

impl<R: Read> ArReader<R> {
  /// Checks the archive magic and creates a reader with the default options.
  pub fn new(source_reader: R) -> Result<Self, ArReaderError<R::ReadError>> {
    Self::try_new(
      source_reader,
      ArReaderOptions::default(),
      IgnoreArViolationHandler,
    )
  }
}

impl<R: Read, VH: ArViolationHandler> ArReader<R, VH> {
  /// Consumes exactly the eight magic bytes from `source_reader`.
  pub fn try_new(
    mut source_reader: R,
    options: ArReaderOptions,
    violation_handler: VH,
  ) -> Result<Self, ArReaderError<R::ReadError>> {
    let mut magic = [0; AR_MAGIC.len()];
    source_reader.read_all(&mut magic)?;
    if &magic != AR_MAGIC {
      return Err(ArReaderError::MissingMagic { found: magic });
    }

    Ok(Self {
      source_reader,
      remaining: 0,
      pending_alignment: false,
      violation_handler,
      options,
    })
  }

  /// Advances to the next member and returns its header.
  ///
  /// Unread content of the current member is discarded first.
  /// Returns `Ok(None)` once the archive has no more members.
  pub fn next_member(&mut self) -> Result<Option<ArHeader>, ArReaderError<R::ReadError>> {
    if self.remaining > 0 {
      self.discard_remaining()?;
    }

    if self.pending_alignment {
      self.pending_alignment = false;
      let mut alignment = [0; 1];
      match self.source_reader.read_all(&mut alignment) {
        Ok(()) => {},
        // Some writers leave out the alignment byte of the last member.
        Err(ReadAllError::UnexpectedEof { .. }) => return Ok(None),
        Err(e) => return Err(e.into()),
      }
    }

    let mut header_bytes = [0; HEADER_SIZE];
    match self.source_reader.read_all(&mut header_bytes) {
      Ok(()) => {},
      Err(ReadAllError::UnexpectedEof { bytes_read: 0, .. }) => return Ok(None),
      Err(e) => return Err(e.into()),
    }

    let raw = ArHeaderRaw::from_bytes(header_bytes);
    let header = ArHeader::decode_with(
      &raw,
      &mut self.violation_handler,
      self.options.verify_header_terminator,
    )?;

    self.remaining = header.size;
    self.pending_alignment = header.needs_alignment();
    Ok(Some(header))
  }

  fn discard_remaining(&mut self) -> Result<(), ArReaderError<R::ReadError>> {
    let mut discard_buffer = [0; ArReaderOptions::MAX_DISCARD_BUFFER_SIZE];
    let buffer_size = self
      .options
      .discard_buffer_size
      .clamp(1, ArReaderOptions::MAX_DISCARD_BUFFER_SIZE);
    while self.read(&mut discard_buffer[..buffer_size])? != 0 {}
    Ok(())
  }

  /// Content bytes of the current member that have not been read yet.
  #[must_use]
  pub fn remaining(&self) -> u64 {
    self.remaining
  }

  #[must_use]
  pub fn get_ref(&self) -> &R {
    &self.source_reader
  }

  #[must_use]
  pub fn violation_handler(&self) -> &VH {
    &self.violation_handler
  }

  /// Returns the underlying reader, positioned wherever the archive was left.
  #[must_use]
  pub fn into_inner(self) -> R {
    self.source_reader
  }
}

impl<R: Read, VH: ArViolationHandler> Read for ArReader<R, VH> {
  type ReadError = ArReaderError<R::ReadError>;

  /// Reads content of the current member. Returns 0 at the end of the member.
  fn read(&mut self, output_buffer: &mut [u8]) -> Result<usize, Self::ReadError> {
    if self.remaining == 0 || output_buffer.is_empty() {
      return Ok(0);
    }

    let bytes_to_read = usize::try_from(self.remaining)
      .map_or(output_buffer.len(), |remaining| {
        remaining.min(output_buffer.len())
      });
    let bytes_read = self
      .source_reader
      .read(&mut output_buffer[..bytes_to_read])
      .map_err(ArReaderError::Io)?;
    if bytes_read == 0 {
      return Err(ArReaderError::TruncatedMember {
        remaining: self.remaining,
      });
    }

    self.remaining -= bytes_read as u64;
    Ok(bytes_read)
  }
}
