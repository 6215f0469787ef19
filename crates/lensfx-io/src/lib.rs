#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any_rgb8`] for automatic format detection.
pub mod functional;

/// Sinks that receive the titled images produced by a pipeline.
pub mod presenter;

pub use crate::error::IoError;
pub use crate::presenter::{FilePresenter, ImagePresenter};
