pub mod config;
pub mod error;
pub mod file;
pub mod trace;

pub use error::{Error, Result};
pub use file::FileRecord;
