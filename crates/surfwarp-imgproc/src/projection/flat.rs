use surfwarp_image::ImageSize;

use super::ProjectionParams;

/// Camera facing a flat wall behind the screen.
///
/// Only the vertical axis is foreshortened, around the ceiling line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatProjection {
    size: ImageSize,
    ceiling_y: f32,
    z_ratio: f32,
}

impl FlatProjection {
    /// Derive the flat projection constants from the source size.
    pub fn new(size: ImageSize, params: &ProjectionParams) -> Self {
        let height = size.height as f32;
        let ceiling_y = height * params.ceiling_ratio;
        let screen_dist = height * params.flat_screen_ratio;
        let back_dist = height * params.back_ratio;

        Self {
            size,
            ceiling_y,
            z_ratio: (back_dist + screen_dist) / screen_dist,
        }
    }

    /// The size of the projected image.
    pub fn output_size(&self) -> ImageSize {
        self.size
    }

    /// Vertical foreshortening ratio between background and screen.
    pub fn z_ratio(&self) -> f32 {
        self.z_ratio
    }

    /// Map a destination pixel to its source coordinate.
    pub fn inverse(&self, i: f32, j: f32) -> (f32, f32) {
        (i, self.ceiling_y + self.z_ratio * (j - self.ceiling_y))
    }

    /// Map a source pixel to its destination coordinate.
    pub fn forward(&self, i: f32, j: f32) -> (f32, f32) {
        (i, self.ceiling_y + (j - self.ceiling_y) / self.z_ratio)
    }
}
