use core::{fmt::Display, num::ParseIntError, str::Utf8Error};

use alloc::string::String;

use thiserror::Error;

use crate::{ReadAllError, WriteAllError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneralParseError {
  #[error("Invalid UTF-8 string: {0}")]
  InvalidUtf8(#[from] Utf8Error),
  #[error("Invalid integer: {0}")]
  InvalidInteger(#[from] ParseIntError),
  #[error("Unsigned integer {0:?} starts with a sign")]
  UnexpectedSign(String),
}

/// Names a field of the 60 byte member header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CorruptFieldContext {
  HeaderName,
  HeaderMtime,
  HeaderUid,
  HeaderGid,
  HeaderMode,
  HeaderSize,
}

impl CorruptFieldContext {
  /// The number of bytes the encoder may use for this field.
  #[must_use]
  pub fn max_length(self) -> usize {
    match self {
      Self::HeaderName => 16,
      Self::HeaderMtime => 12,
      Self::HeaderUid | Self::HeaderGid => 6,
      Self::HeaderMode => 8,
      Self::HeaderSize => 10,
    }
  }
}

impl Display for CorruptFieldContext {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::HeaderName => write!(f, "header.name"),
      Self::HeaderMtime => write!(f, "header.mtime"),
      Self::HeaderUid => write!(f, "header.uid"),
      Self::HeaderGid => write!(f, "header.gid"),
      Self::HeaderMode => write!(f, "header.mode"),
      Self::HeaderSize => write!(f, "header.size"),
    }
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArHeaderDecodeError {
  #[error("Malformed header field {field}: {error}")]
  MalformedHeader {
    field: CorruptFieldContext,
    error: GeneralParseError,
  },
  #[error("Header terminator is {found:?} instead of \"`\\n\"")]
  BadFileMagic { found: [u8; 2] },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArHeaderEncodeError {
  #[error("Member name cannot be empty")]
  EmptyName,
  #[error("Member name {0:?} ends in '/', which is stripped when read back")]
  NameEndsWithSlash(String),
  #[error("Member name {0:?} ends in a space, which is trimmed when read back")]
  NameEndsWithSpace(String),
  #[error("Field {field} needs {length} bytes but only {} are available", .field.max_length())]
  FieldTooLong {
    field: CorruptFieldContext,
    length: usize,
  },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArReaderError<U> {
  #[error("Invalid archive: missing magic number, found {found:?}")]
  MissingMagic { found: [u8; 8] },
  #[error("Unexpected EOF while reading {bytes_requested} bytes, only {bytes_read} bytes read")]
  UnexpectedEof {
    bytes_requested: usize,
    bytes_read: usize,
  },
  #[error("Archive ended with {remaining} bytes of the current member unread")]
  TruncatedMember { remaining: u64 },
  #[error("Header error: {0}")]
  Header(#[from] ArHeaderDecodeError),
  #[error("Underlying read error: {0:?}")]
  Io(U),
}

impl<U> From<ReadAllError<U>> for ArReaderError<U> {
  fn from(error: ReadAllError<U>) -> Self {
    match error {
      ReadAllError::UnexpectedEof {
        bytes_requested,
        bytes_read,
      } => Self::UnexpectedEof {
        bytes_requested,
        bytes_read,
      },
      ReadAllError::Io(e) => Self::Io(e),
    }
  }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArWriterError<U> {
  #[error("Member not fully written, {remaining} bytes still expected")]
  MemberNotComplete { remaining: u64 },
  #[error("Write too long: {bytes_written} bytes written, {bytes_rejected} bytes exceed the member size")]
  WriteOverflow {
    bytes_written: usize,
    bytes_rejected: usize,
  },
  #[error("Header error: {0}")]
  Header(#[from] ArHeaderEncodeError),
  #[error("Underlying write error: {0:?}")]
  Io(#[from] WriteAllError<U>),
}
