use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use surfwarp_image::{Image, PixelDepth};

/// Interpolation mode used when sampling the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel, one value per channel. The image must not be empty and the
/// coordinate must be finite.
///
/// # Example
///
/// ```
/// use surfwarp_image::{Image, ImageSize};
/// use surfwarp_imgproc::interpolation::{interpolate_pixel, InterpolationMode};
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![0, 100]).unwrap();
///
/// assert_eq!(interpolate_pixel(&image, 0.5, 0.0, InterpolationMode::Bilinear), [50]);
/// assert_eq!(interpolate_pixel(&image, 0.6, 0.0, InterpolationMode::Nearest), [100]);
/// ```
pub fn interpolate_pixel<T: PixelDepth, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> [T; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
