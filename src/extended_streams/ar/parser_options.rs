#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArReaderOptions {
  /// Report a member header whose last two bytes are not `` `\n `` to the violation handler.
  ///
  /// Off by default: the terminator is not needed to decode the header.
  pub verify_header_terminator: bool,
  /// Size of the stack buffer used to drop the unread rest of a member.
  pub discard_buffer_size: usize,
}

impl ArReaderOptions {
  /// Upper bound for [`ArReaderOptions::discard_buffer_size`].
  pub const MAX_DISCARD_BUFFER_SIZE: usize = 4096;
}

impl Default for ArReaderOptions {
  fn default() -> Self {
    Self {
      verify_header_terminator: false,
      discard_buffer_size: 512,
    }
  }
}
