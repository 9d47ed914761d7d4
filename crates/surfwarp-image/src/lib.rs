#![deny(missing_docs)]
//! Image types and traits for generating and manipulating images

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// pixel channel types and runtime pixel formats.
pub mod pixel;

/// images whose pixel format is only known at runtime.
pub mod dynamic;

pub use crate::dynamic::DynamicImage;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::pixel::{PixelDepth, PixelFormat};
