//! Pixel interpolation methods for image transformations.
//!
//! This module provides the sampling kernels used when resampling images during the
//! projection onto flat and cylindrical surfaces.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//!
//! Both kernels fold out-of-range neighbours back into the image with reflect-101
//! addressing, so any finite coordinate yields a defined pixel.

mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use interpolate::{interpolate_pixel, InterpolationMode};
pub use remap::remap;
