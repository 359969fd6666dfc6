#[cfg(feature = "std")]
mod rw_std;

#[cfg(feature = "std")]
pub use rw_std::*;
