//! Sequential reading and writing of Plan 9 style `ar` archives.
//!
//! The archive is read with [`ArReader`] and written with [`ArWriter`].
//! Both are driven member by member and expose the current member's content
//! through the crate's own [`Read`] and [`Write`] traits, so they work
//! without `std`.
#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod core_streams;
pub mod extended_streams;
mod traits;

pub use core_streams::*;
pub use extended_streams::ar::*;
pub use traits::*;
