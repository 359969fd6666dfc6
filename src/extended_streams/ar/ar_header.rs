use alloc::string::{String, ToString as _};

use zerocopy::FromZeros as _;

use crate::extended_streams::ar::{
  ar_constants::{
    encode_field, parse_decimal_i64, parse_decimal_u32, parse_decimal_u64, parse_octal_u32,
    trim_trailing_spaces, ArHeaderRaw, AR_FILE_MAGIC,
  },
  ArHeaderDecodeError, ArHeaderEncodeError, ArViolationHandler, CorruptFieldContext,
  GeneralParseError, IgnoreArViolationHandler, VHW,
};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeStamp {
  pub seconds_since_epoch: i64,
  /// Not stored in the archive, dropped on encode.
  pub nanoseconds: u32,
}

impl TimeStamp {
  #[must_use]
  pub fn from_seconds(seconds_since_epoch: i64) -> Self {
    Self {
      seconds_since_epoch,
      nanoseconds: 0,
    }
  }
}

/// Represents permissions for a single user class (owner, group, or other)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permission {
  pub read: bool,
  pub write: bool,
  pub execute: bool,
}

impl Permission {
  fn from_bits(bits: u32) -> Self {
    Self {
      read: bits & 0o4 != 0,
      write: bits & 0o2 != 0,
      execute: bits & 0o1 != 0,
    }
  }

  fn to_bits(&self) -> u32 {
    u32::from(self.read) << 2 | u32::from(self.write) << 1 | u32::from(self.execute)
  }
}

/// Represents file permissions split into owner, group, and other
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePermissions {
  pub owner: Permission,
  pub group: Permission,
  pub other: Permission,
  pub set_uid: bool,
  pub set_gid: bool,
  pub sticky: bool,
}

impl Default for FilePermissions {
  /// `0o644`
  fn default() -> Self {
    Self::from_mode(0o644)
  }
}

impl FilePermissions {
  /// Extracts the permission bits of a Unix `st_mode` value. File type bits are ignored.
  #[must_use]
  pub fn from_mode(mode: u32) -> Self {
    Self {
      owner: Permission::from_bits(mode >> 6),
      group: Permission::from_bits(mode >> 3),
      other: Permission::from_bits(mode),
      set_uid: mode & 0o4000 != 0,
      set_gid: mode & 0o2000 != 0,
      sticky: mode & 0o1000 != 0,
    }
  }

  /// Returns the permission bits (`0o7777` at most).
  #[must_use]
  pub fn to_mode(&self) -> u32 {
    let mut mode =
      self.owner.to_bits() << 6 | self.group.to_bits() << 3 | self.other.to_bits();
    if self.set_uid {
      mode |= 0o4000;
    }
    if self.set_gid {
      mode |= 0o2000;
    }
    if self.sticky {
      mode |= 0o1000;
    }
    mode
  }
}

/// Describes one archive member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArHeader {
  /// At most 16 bytes, without a trailing `/` or space.
  pub name: String,
  pub mtime: TimeStamp,
  pub uid: u32,
  pub gid: u32,
  /// Unix mode bits including the file type, stored in octal.
  pub mode: u32,
  /// Number of content bytes following the header.
  pub size: u64,
}

impl ArHeader {
  #[must_use]
  pub fn new(name: impl Into<String>, size: u64) -> Self {
    Self {
      name: name.into(),
      mode: FilePermissions::default().to_mode(),
      size,
      ..Default::default()
    }
  }

  #[must_use]
  pub fn permissions(&self) -> FilePermissions {
    FilePermissions::from_mode(self.mode)
  }

  pub fn set_permissions(&mut self, permissions: &FilePermissions) {
    self.mode = (self.mode & !0o7777) | permissions.to_mode();
  }

  /// Whether a newline follows the content to keep the next header at an even offset.
  #[must_use]
  pub fn needs_alignment(&self) -> bool {
    self.size % 2 == 1
  }

  /// Decodes a header, reading unparseable numeric fields as zero.
  pub fn decode(raw: &ArHeaderRaw) -> Result<Self, ArHeaderDecodeError> {
    Self::decode_with(raw, &mut IgnoreArViolationHandler, false)
  }

  /// Decodes a header, passing every malformed field to `violation_handler`.
  ///
  /// A field the handler accepts decodes to zero.
  /// The terminator is only looked at when `verify_file_magic` is set.
  pub fn decode_with<VH: ArViolationHandler>(
    raw: &ArHeaderRaw,
    violation_handler: &mut VH,
    verify_file_magic: bool,
  ) -> Result<Self, ArHeaderDecodeError> {
    let mut vh = VHW(violation_handler);

    let name = Self::decode_name(&raw.name, &mut vh)?;
    let mtime = vh
      .hpvr(CorruptFieldContext::HeaderMtime, parse_decimal_i64(&raw.mtime))?
      .unwrap_or_default();
    let uid = vh
      .hpvr(CorruptFieldContext::HeaderUid, parse_decimal_u32(&raw.uid))?
      .unwrap_or_default();
    let gid = vh
      .hpvr(CorruptFieldContext::HeaderGid, parse_decimal_u32(raw.gid_field()))?
      .unwrap_or_default();
    let mode = vh
      .hpvr(CorruptFieldContext::HeaderMode, parse_octal_u32(&raw.mode))?
      .unwrap_or_default();
    let size = vh
      .hpvr(CorruptFieldContext::HeaderSize, parse_decimal_u64(&raw.size))?
      .unwrap_or_default();

    if verify_file_magic && !raw.has_valid_file_magic() {
      vh.hpve(ArHeaderDecodeError::BadFileMagic {
        found: raw.file_magic,
      })?;
    }

    Ok(Self {
      name,
      mtime: TimeStamp::from_seconds(mtime),
      uid,
      gid,
      mode,
      size,
    })
  }

  fn decode_name<VH: ArViolationHandler>(
    name_bytes: &[u8],
    vh: &mut VHW<'_, VH>,
  ) -> Result<String, ArHeaderDecodeError> {
    let trimmed = trim_trailing_spaces(name_bytes);
    let trimmed = trimmed.strip_suffix(b"/").unwrap_or(trimmed);
    let name = match core::str::from_utf8(trimmed) {
      Ok(name) => name.to_string(),
      Err(e) => {
        vh.hpve(ArHeaderDecodeError::MalformedHeader {
          field: CorruptFieldContext::HeaderName,
          error: GeneralParseError::InvalidUtf8(e),
        })?;
        String::from_utf8_lossy(trimmed).into_owned()
      },
    };
    Ok(name)
  }

  /// Encodes the header into its 60 byte form.
  ///
  /// Sub-second precision of `mtime` is dropped.
  pub fn encode(&self) -> Result<ArHeaderRaw, ArHeaderEncodeError> {
    if self.name.is_empty() {
      return Err(ArHeaderEncodeError::EmptyName);
    }
    if self.name.ends_with('/') {
      return Err(ArHeaderEncodeError::NameEndsWithSlash(self.name.clone()));
    }
    if self.name.ends_with(' ') {
      return Err(ArHeaderEncodeError::NameEndsWithSpace(self.name.clone()));
    }

    let mut raw = ArHeaderRaw::new_zeroed();
    encode_field(
      &mut raw.name,
      CorruptFieldContext::HeaderName,
      format_args!("{}", self.name),
    )?;
    encode_field(
      &mut raw.mtime,
      CorruptFieldContext::HeaderMtime,
      format_args!("{}", self.mtime.seconds_since_epoch),
    )?;
    encode_field(
      &mut raw.uid,
      CorruptFieldContext::HeaderUid,
      format_args!("{}", self.uid),
    )?;
    encode_field(
      &mut raw.gid,
      CorruptFieldContext::HeaderGid,
      format_args!("{}", self.gid),
    )?;
    encode_field(
      &mut raw.mode,
      CorruptFieldContext::HeaderMode,
      format_args!("{:o}", self.mode),
    )?;
    encode_field(
      &mut raw.size,
      CorruptFieldContext::HeaderSize,
      format_args!("{}", self.size),
    )?;

    raw.pad_with_spaces();
    raw.file_magic = *AR_FILE_MAGIC;
    Ok(raw)
  }
}
