#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// collision resolution for forward mapping.
pub mod accumulate;

/// utilities for interpolation.
pub mod interpolation;

/// border index mapping and image padding.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// projection models for flat and cylindrical viewing surfaces.
pub mod projection;

/// frame transforms driving the projection models.
pub mod transform;
