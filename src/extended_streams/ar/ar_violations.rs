use alloc::vec::Vec;

use crate::extended_streams::ar::{ArHeaderDecodeError, CorruptFieldContext, GeneralParseError};

pub trait ArViolationHandler {
  /// When a header field cannot be decoded, this method is called.
  /// It should return `true` if decoding should continue with the field read as zero.
  /// Returning `false` aborts decoding with `error`.
  #[must_use]
  fn handle(&mut self, error: &ArHeaderDecodeError) -> bool;
}

impl<VH: ArViolationHandler + ?Sized> ArViolationHandler for &mut VH {
  fn handle(&mut self, error: &ArHeaderDecodeError) -> bool {
    (**self).handle(error)
  }
}

/// Rejects every malformed header field except the group id.
///
/// The group id is read from bytes 34 to 42, the last two of which belong to
/// the mode field. It therefore only parses for six digit ids, so problems in
/// that field are let through and decode to zero.
#[derive(Debug, Default)]
pub struct StrictArViolationHandler;

impl ArViolationHandler for StrictArViolationHandler {
  fn handle(&mut self, error: &ArHeaderDecodeError) -> bool {
    matches!(
      error,
      ArHeaderDecodeError::MalformedHeader {
        field: CorruptFieldContext::HeaderGid,
        ..
      }
    )
  }
}

/// Records every violation and keeps decoding.
#[derive(Debug, Default)]
pub struct AuditArViolationHandler {
  pub violations: Vec<ArHeaderDecodeError>,
}

impl AuditArViolationHandler {
  #[must_use]
  pub fn new() -> Self {
    Self {
      violations: Vec::new(),
    }
  }
}

impl ArViolationHandler for AuditArViolationHandler {
  fn handle(&mut self, error: &ArHeaderDecodeError) -> bool {
    self.violations.push(error.clone());
    true
  }
}

/// Accepts everything. This gives the lenient zero-on-failure decoding.
#[derive(Debug, Default)]
pub struct IgnoreArViolationHandler;

impl ArViolationHandler for IgnoreArViolationHandler {
  fn handle(&mut self, _error: &ArHeaderDecodeError) -> bool {
    true
  }
}

/// A wrapper around an `ArViolationHandler` that provides convenience methods for handling violations.
pub(crate) struct VHW<'a, VH: ArViolationHandler>(pub(crate) &'a mut VH);

impl<VH: ArViolationHandler> VHW<'_, VH> {
  /// Handles a potential violation of `field` in result form by calling the violation handler.
  pub(crate) fn hpvr<T>(
    &mut self,
    field: CorruptFieldContext,
    operation_result: Result<T, GeneralParseError>,
  ) -> Result<Option<T>, ArHeaderDecodeError> {
    match operation_result {
      Ok(v) => Ok(Some(v)),
      Err(error) => {
        self.hpve(ArHeaderDecodeError::MalformedHeader { field, error })?;
        Ok(None)
      },
    }
  }

  /// Handles a potential violation in error form by calling the violation handler.
  pub(crate) fn hpve(&mut self, error: ArHeaderDecodeError) -> Result<(), ArHeaderDecodeError> {
    if self.0.handle(&error) {
      Ok(())
    } else {
      Err(error)
    }
  }
}
