use core::{fmt, ops::Range, str::Utf8Error};

use alloc::string::ToString as _;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::extended_streams::ar::{ArHeaderEncodeError, CorruptFieldContext, GeneralParseError};

// --- Constants for the Plan 9 ar format ---

/// The magic number at the beginning of every archive.
pub const AR_MAGIC: &[u8; 8] = b"!<arch>\n";
/// The magic number terminating each member header.
pub const AR_FILE_MAGIC: &[u8; 2] = b"`\n";
/// Size of a member header in bytes.
pub const HEADER_SIZE: usize = 60;

/// Bytes the decoder reads the group id from.
///
/// The range runs two bytes into the mode field. Archives in this format
/// have always been read this way, so it must not be narrowed.
pub(crate) const GID_DECODE_RANGE: Range<usize> = 34..42;

/// Byte written after the content of an odd sized member.
pub(crate) const ALIGNMENT_BYTE: u8 = b'\n';

/// The member header as it is laid out by the encoder.
///
/// All fields are left-justified ASCII padded with spaces.
#[derive(FromBytes, IntoBytes, KnownLayout, Immutable, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ArHeaderRaw {
  /// Member name, optionally terminated by `/`
  pub name: [u8; 16],
  /// Modification time (epoch seconds, decimal)
  pub mtime: [u8; 12],
  /// User ID of the owner (decimal)
  pub uid: [u8; 6],
  /// Group ID of the owner (decimal)
  ///
  /// See [`ArHeaderRaw::gid_field`] for how this is read back.
  pub gid: [u8; 6],
  /// File mode (octal)
  pub mode: [u8; 8],
  /// Content size in bytes (decimal)
  pub size: [u8; 10],
  /// Always [`AR_FILE_MAGIC`]
  pub file_magic: [u8; 2],
}

impl ArHeaderRaw {
  #[must_use]
  pub fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
    zerocopy::transmute!(bytes)
  }

  #[must_use]
  pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
    let mut bytes = [0; HEADER_SIZE];
    bytes.copy_from_slice(self.as_bytes());
    bytes
  }

  /// The group id as the decoder sees it: `gid` followed by the first two bytes of `mode`.
  #[must_use]
  pub fn gid_field(&self) -> &[u8] {
    &self.as_bytes()[GID_DECODE_RANGE]
  }

  #[must_use]
  pub fn has_valid_file_magic(&self) -> bool {
    &self.file_magic == AR_FILE_MAGIC
  }

  /// Replaces every NUL byte with a space.
  ///
  /// Runs over the whole header, including bytes no field was written to.
  pub(crate) fn pad_with_spaces(&mut self) {
    for byte in self.as_mut_bytes() {
      if *byte == 0 {
        *byte = b' ';
      }
    }
  }
}

/// Strips trailing spaces (and nothing else) from a field.
pub(crate) fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
  let end = bytes
    .iter()
    .rposition(|&b| b != b' ')
    .map_or(0, |index| index + 1);
  &bytes[..end]
}

pub(crate) fn parse_field_str(bytes: &[u8]) -> Result<&str, Utf8Error> {
  core::str::from_utf8(trim_trailing_spaces(bytes))
}

pub(crate) fn parse_decimal_i64(bytes: &[u8]) -> Result<i64, GeneralParseError> {
  Ok(parse_field_str(bytes)?.parse::<i64>()?)
}

/// Like [`parse_field_str`], but refuses the leading `+` that `str::parse` would accept.
fn parse_unsigned_field_str(bytes: &[u8]) -> Result<&str, GeneralParseError> {
  let field = parse_field_str(bytes)?;
  if field.starts_with('+') {
    return Err(GeneralParseError::UnexpectedSign(field.to_string()));
  }
  Ok(field)
}

pub(crate) fn parse_decimal_u64(bytes: &[u8]) -> Result<u64, GeneralParseError> {
  Ok(parse_unsigned_field_str(bytes)?.parse::<u64>()?)
}

pub(crate) fn parse_decimal_u32(bytes: &[u8]) -> Result<u32, GeneralParseError> {
  Ok(parse_unsigned_field_str(bytes)?.parse::<u32>()?)
}

pub(crate) fn parse_octal_u32(bytes: &[u8]) -> Result<u32, GeneralParseError> {
  Ok(u32::from_str_radix(parse_unsigned_field_str(bytes)?, 8)?)
}

/// Formats into a fixed width field, counting bytes that did not fit.
struct FieldCursor<'a> {
  field: &'a mut [u8],
  length: usize,
}

impl fmt::Write for FieldCursor<'_> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    let start = self.length.min(self.field.len());
    let end = (self.length + s.len()).min(self.field.len());
    self.field[start..end].copy_from_slice(&s.as_bytes()[..end - start]);
    self.length += s.len();
    Ok(())
  }
}

/// Writes `value` left-justified into `field`. Unused bytes are left untouched.
pub(crate) fn encode_field(
  field: &mut [u8],
  context: CorruptFieldContext,
  value: fmt::Arguments<'_>,
) -> Result<(), ArHeaderEncodeError> {
  let mut cursor = FieldCursor { field, length: 0 };
  fmt::write(&mut cursor, value).map_err(|_| ArHeaderEncodeError::FieldTooLong {
    field: context,
    length: cursor.length,
  })?;
  if cursor.length > context.max_length() {
    return Err(ArHeaderEncodeError::FieldTooLong {
      field: context,
      length: cursor.length,
    });
  }
  Ok(())
}
