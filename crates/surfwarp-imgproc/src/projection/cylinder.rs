use std::f32::consts::FRAC_PI_2;

use surfwarp_image::ImageSize;

use super::{ProjectionError, ProjectionParams};

const MAX_NEWTON_ITERATIONS: usize = 16;
const NEWTON_TOLERANCE: f32 = 1e-4;
const MIN_COLUMN_SLOPE: f32 = 1e-3;

/// Camera and cylinder constants derived from the source size.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CylinderGeometry {
    size: ImageSize,
    radius: f32,
    half_width: f32,
    ceiling_y: f32,
    screen_dist: f32,
    // cosine of the angle subtended by the half width
    edge_cos: f32,
}

impl CylinderGeometry {
    fn new(size: ImageSize, params: &ProjectionParams) -> Result<Self, ProjectionError> {
        let (width, height) = (size.width as f32, size.height as f32);
        let radius = width * params.radius_ratio;
        let half_width = width * 0.5;

        if !radius.is_finite() || radius <= 0.0 || half_width / radius > FRAC_PI_2 {
            return Err(ProjectionError::DegenerateRadius { radius, half_width });
        }

        Ok(Self {
            size,
            radius,
            half_width,
            ceiling_y: height * params.ceiling_ratio,
            screen_dist: height.hypot(width),
            edge_cos: (half_width / radius).cos(),
        })
    }

    /// Angle on the cylinder of a destination column.
    #[inline]
    fn angle(&self, i: f32) -> f32 {
        (i - self.half_width) / self.radius
    }

    /// Ratio between the background depth at `angle` and the screen distance.
    #[inline]
    fn z_ratio(&self, angle: f32) -> f32 {
        let back_dist = self.radius * (angle.cos() - self.edge_cos);
        (back_dist + self.screen_dist) / self.screen_dist
    }

    /// Derivative of the source column with respect to the destination column at `angle`.
    #[inline]
    fn column_slope(&self, angle: f32) -> f32 {
        let (sin, cos) = angle.sin_cos();
        self.z_ratio(angle) * cos - self.radius * sin * sin / self.screen_dist
    }

    #[inline]
    fn row(&self, j: f32, z_ratio: f32) -> f32 {
        self.ceiling_y + z_ratio * (j - self.ceiling_y)
    }
}

/// Camera facing the inside of a vertical cylinder, keeping the source size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderProjection {
    geometry: CylinderGeometry,
    invertible: bool,
}

impl CylinderProjection {
    /// Derive the cylinder constants from the source size.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::DegenerateRadius`] when the half width spans more than a
    /// quarter turn of the cylinder.
    pub fn new(size: ImageSize, params: &ProjectionParams) -> Result<Self, ProjectionError> {
        let geometry = CylinderGeometry::new(size, params)?;
        // the slope is smallest at the edges, so a positive edge slope makes the map monotonic
        let invertible = geometry.column_slope(geometry.angle(0.0)) > 0.0;

        Ok(Self {
            geometry,
            invertible,
        })
    }

    /// The size of the projected image.
    pub fn output_size(&self) -> ImageSize {
        self.geometry.size
    }

    /// Whether the column map increases over the whole width, so [`Self::forward`] is defined.
    ///
    /// Radii close to a quarter turn fold the outer columns back and have no forward form.
    pub fn is_invertible(&self) -> bool {
        self.invertible
    }

    /// Source column and foreshortening ratio of a destination column.
    fn column(&self, i: f32) -> (f32, f32) {
        let g = &self.geometry;
        let angle = g.angle(i);
        let z_ratio = g.z_ratio(angle);
        (g.half_width + z_ratio * g.radius * angle.sin(), z_ratio)
    }

    /// Derivative of the source column with respect to the destination column.
    fn column_slope(&self, i: f32) -> f32 {
        let g = &self.geometry;
        g.column_slope(g.angle(i)).max(MIN_COLUMN_SLOPE)
    }

    /// Find the destination column whose source column is `i_src`.
    ///
    /// The column map is increasing over the destination width, so Newton steps clamped to
    /// the width converge. Columns outside the mapped range are extrapolated linearly.
    fn solve_column(&self, i_src: f32) -> f32 {
        let (lo, hi) = (0.0, self.geometry.size.width as f32);
        let (src_lo, _) = self.column(lo);
        let (src_hi, _) = self.column(hi);

        if i_src <= src_lo {
            return lo - (src_lo - i_src) / self.column_slope(lo);
        }
        if i_src >= src_hi {
            return hi + (i_src - src_hi) / self.column_slope(hi);
        }

        let mut i = i_src.clamp(lo, hi);
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (current, _) = self.column(i);
            let step = (current - i_src) / self.column_slope(i);
            i = (i - step).clamp(lo, hi);
            if step.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
        i
    }

    /// Map a destination pixel to its source coordinate.
    pub fn inverse(&self, i: f32, j: f32) -> (f32, f32) {
        let (i_src, z_ratio) = self.column(i);
        (i_src, self.geometry.row(j, z_ratio))
    }

    /// Map a source pixel to its destination coordinate.
    ///
    /// Only meaningful when [`Self::is_invertible`] holds.
    pub fn forward(&self, i: f32, j: f32) -> (f32, f32) {
        let g = &self.geometry;
        let i_dst = self.solve_column(i);
        let z_ratio = g.z_ratio(g.angle(i_dst));
        (i_dst, g.ceiling_y + (j - g.ceiling_y) / z_ratio)
    }
}

/// Cylinder projection stretched so the whole cylinder width covers the source width.
///
/// The output keeps the source width and grows in height by `1 / x_scale` so no rows are
/// clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderFixedWidthProjection {
    geometry: CylinderGeometry,
    x_scale: f32,
    output_size: ImageSize,
}

impl CylinderFixedWidthProjection {
    /// Derive the constants and the adjusted output height from the source size.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::DegenerateRadius`] when the half width spans more than a
    /// quarter turn of the cylinder.
    pub fn new(size: ImageSize, params: &ProjectionParams) -> Result<Self, ProjectionError> {
        let geometry = CylinderGeometry::new(size, params)?;
        let x_scale = fixed_width_scale(geometry.radius, geometry.half_width);
        let height = (size.height as f32 / x_scale).ceil() as usize;

        Ok(Self {
            geometry,
            x_scale,
            output_size: ImageSize {
                width: size.width,
                height,
            },
        })
    }

    /// Ratio between the projected chord and the half width.
    pub fn x_scale(&self) -> f32 {
        self.x_scale
    }

    /// The size of the projected image.
    pub fn output_size(&self) -> ImageSize {
        self.output_size
    }

    /// Map a destination pixel to its source coordinate.
    pub fn inverse(&self, i: f32, j: f32) -> (f32, f32) {
        let g = &self.geometry;
        // rounding can push the ratio just past one at the outer columns
        let chord = ((i - g.half_width) * self.x_scale / g.radius).clamp(-1.0, 1.0);
        let angle = chord.asin();
        let z_ratio = g.z_ratio(angle);
        (
            g.half_width + g.radius * angle,
            g.row(j * self.x_scale, z_ratio),
        )
    }
}

/// Horizontal scale `r · sin(half_width / r) / half_width` of the fixed width cylinder.
pub fn fixed_width_scale(radius: f32, half_width: f32) -> f32 {
    radius * (half_width / radius).sin() / half_width
}
