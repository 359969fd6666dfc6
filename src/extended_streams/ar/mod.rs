mod ar_header;
mod ar_reader;
mod ar_violations;
mod ar_writer;
mod parser_options;
mod parsing_errors;
pub(crate) mod ar_constants;

pub use ar_constants::{ArHeaderRaw, AR_FILE_MAGIC, AR_MAGIC, HEADER_SIZE};
pub use ar_header::*;
pub use ar_reader::*;
pub use ar_violations::*;
pub use ar_writer::*;
pub use parser_options::*;
pub use parsing_errors::*;

#[cfg(test)]
mod ar_test;
