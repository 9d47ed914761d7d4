//! Projection models mapping pixels between a source image and a virtual viewing surface.
//!
//! Every model is built from the source size and a set of [`ProjectionParams`] and exposes
//! an inverse mapping (destination pixel to source coordinate) and, where the geometry allows
//! it, a forward mapping (source pixel to destination coordinate).
//!
//! # Example
//!
//! ```
//! use surfwarp_image::ImageSize;
//! use surfwarp_imgproc::projection::{ProjectionKind, ProjectionModel, ProjectionParams};
//!
//! let size = ImageSize { width: 512, height: 512 };
//! let model = ProjectionModel::new(ProjectionKind::CylinderFixedWidth, size, &ProjectionParams::default())
//!     .unwrap();
//!
//! assert_eq!(model.output_size().width, 512);
//! assert_eq!(model.output_size().height, 609);
//! ```

mod cylinder;
mod error;
mod flat;
mod params;

use std::{fmt, str::FromStr};

use surfwarp_image::ImageSize;

pub use cylinder::{fixed_width_scale, CylinderFixedWidthProjection, CylinderProjection};
pub use error::ProjectionError;
pub use flat::FlatProjection;
pub use params::ProjectionParams;

/// The family of supported viewing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionKind {
    /// No change.
    Identity,
    /// Flat wall behind the screen.
    Flat,
    /// Inside of a vertical cylinder, same size as the source.
    #[default]
    Cylinder,
    /// Inside of a vertical cylinder, stretched to the source width.
    CylinderFixedWidth,
}

impl ProjectionKind {
    /// Every kind, in declaration order.
    pub const ALL: [ProjectionKind; 4] = [
        ProjectionKind::Identity,
        ProjectionKind::Flat,
        ProjectionKind::Cylinder,
        ProjectionKind::CylinderFixedWidth,
    ];

    fn name(&self) -> &'static str {
        match self {
            ProjectionKind::Identity => "identity",
            ProjectionKind::Flat => "flat",
            ProjectionKind::Cylinder => "cylinder",
            ProjectionKind::CylinderFixedWidth => "cylinder-fixed-width",
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ProjectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| format!("unknown projection kind: {s}"))
    }
}

/// Which image the per-pixel loop iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Iterate destination pixels and sample the source.
    #[default]
    Inverse,
    /// Iterate source pixels and write into the destination.
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inverse => f.write_str("inverse"),
            Direction::Forward => f.write_str("forward"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inverse" => Ok(Direction::Inverse),
            "forward" => Ok(Direction::Forward),
            _ => Err(format!("unknown direction: {s}")),
        }
    }
}

/// A projection model with its constants precomputed for one source size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionModel {
    /// No change.
    Identity(ImageSize),
    /// Flat wall behind the screen.
    Flat(FlatProjection),
    /// Inside of a vertical cylinder, same size as the source.
    Cylinder(CylinderProjection),
    /// Inside of a vertical cylinder, stretched to the source width.
    CylinderFixedWidth(CylinderFixedWidthProjection),
}

impl ProjectionModel {
    /// Build the model of `kind` for a source image of `size`.
    ///
    /// # Errors
    ///
    /// * [`ProjectionError::InvalidDimensions`] if the source has no pixels.
    /// * [`ProjectionError::InvalidParameter`] if a ratio in `params` is rejected.
    /// * [`ProjectionError::DegenerateRadius`] if the cylinder radius is too small.
    pub fn new(
        kind: ProjectionKind,
        size: ImageSize,
        params: &ProjectionParams,
    ) -> Result<Self, ProjectionError> {
        if size.width == 0 || size.height == 0 {
            return Err(ProjectionError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        params.validate()?;

        let model = match kind {
            ProjectionKind::Identity => ProjectionModel::Identity(size),
            ProjectionKind::Flat => ProjectionModel::Flat(FlatProjection::new(size, params)),
            ProjectionKind::Cylinder => {
                ProjectionModel::Cylinder(CylinderProjection::new(size, params)?)
            }
            ProjectionKind::CylinderFixedWidth => {
                ProjectionModel::CylinderFixedWidth(CylinderFixedWidthProjection::new(size, params)?)
            }
        };

        log::trace!("built {kind} projection for {size}: {model:?}");

        Ok(model)
    }

    /// The kind of this model.
    pub fn kind(&self) -> ProjectionKind {
        match self {
            ProjectionModel::Identity(_) => ProjectionKind::Identity,
            ProjectionModel::Flat(_) => ProjectionKind::Flat,
            ProjectionModel::Cylinder(_) => ProjectionKind::Cylinder,
            ProjectionModel::CylinderFixedWidth(_) => ProjectionKind::CylinderFixedWidth,
        }
    }

    /// The size of the projected image.
    pub fn output_size(&self) -> ImageSize {
        match self {
            ProjectionModel::Identity(size) => *size,
            ProjectionModel::Flat(model) => model.output_size(),
            ProjectionModel::Cylinder(model) => model.output_size(),
            ProjectionModel::CylinderFixedWidth(model) => model.output_size(),
        }
    }

    /// Whether the model can be run in `direction`.
    pub fn supports(&self, direction: Direction) -> bool {
        match direction {
            Direction::Inverse => true,
            Direction::Forward => match self {
                ProjectionModel::Cylinder(model) => model.is_invertible(),
                ProjectionModel::CylinderFixedWidth(_) => false,
                _ => true,
            },
        }
    }

    /// Map a destination pixel `(i, j)` to a continuous source coordinate.
    #[inline]
    pub fn inverse(&self, i: f32, j: f32) -> (f32, f32) {
        match self {
            ProjectionModel::Identity(_) => (i, j),
            ProjectionModel::Flat(model) => model.inverse(i, j),
            ProjectionModel::Cylinder(model) => model.inverse(i, j),
            ProjectionModel::CylinderFixedWidth(model) => model.inverse(i, j),
        }
    }

    /// Map a source pixel `(i, j)` to a continuous destination coordinate.
    ///
    /// Returns `None` for models without a forward form, see [`Self::supports`].
    #[inline]
    pub fn forward(&self, i: f32, j: f32) -> Option<(f32, f32)> {
        match self {
            ProjectionModel::Identity(_) => Some((i, j)),
            ProjectionModel::Flat(model) => Some(model.forward(i, j)),
            ProjectionModel::Cylinder(model) if model.is_invertible() => {
                Some(model.forward(i, j))
            }
            ProjectionModel::Cylinder(_) => None,
            ProjectionModel::CylinderFixedWidth(_) => None,
        }
    }
}
