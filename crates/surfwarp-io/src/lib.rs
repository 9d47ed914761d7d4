#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any`] for automatic format detection.
pub mod functional;

pub use error::IoError;
pub use functional::{read_image_any, write_image};
