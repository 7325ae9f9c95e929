//! Removes Terraform `removed` blocks from `.tf` files, byte-exactly, then reformats
//! the result into canonical layout.

// region:    --- Modules

mod discover;
mod error;
mod formatter;
mod locator;
mod normalizer;
mod process_options;
mod process_status;
mod processor;
mod splicer;
mod stats;

pub mod lexer;

pub use discover::*;
pub use error::*;
pub use formatter::*;
pub use locator::*;
pub use normalizer::*;
pub use process_options::*;
pub use process_status::*;
pub use processor::*;
pub use splicer::*;
pub use stats::*;

// endregion: --- Modules
