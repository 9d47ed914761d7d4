use surfwarp_image::ImageError;

use super::{Direction, ProjectionKind};

/// Errors that can occur while building or running a projection.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProjectionError {
    /// The image has no pixels along one of its axes.
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// width of the offending image.
        width: usize,
        /// height of the offending image.
        height: usize,
    },

    /// The cylinder radius does not cover the half width within a quarter turn.
    #[error("Cylinder radius {radius} is degenerate for half width {half_width}")]
    DegenerateRadius {
        /// the cylinder radius in pixels.
        radius: f32,
        /// half of the image width in pixels.
        half_width: f32,
    },

    /// A projection ratio is not finite or out of range.
    #[error("Invalid projection parameter {name}: {value}")]
    InvalidParameter {
        /// name of the parameter.
        name: &'static str,
        /// rejected value.
        value: f32,
    },

    /// The model cannot be run in the requested direction.
    #[error("The {kind} projection does not support {direction} mapping")]
    UnsupportedDirection {
        /// the projection kind.
        kind: ProjectionKind,
        /// the requested direction.
        direction: Direction,
    },

    /// Error coming from the image containers.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}
