mod copy;
mod read;
mod read_all;
mod write;
mod write_all;

pub use copy::*;
pub use read::*;
pub use read_all::*;
pub use write::*;
pub use write_all::*;
