use crate::parallel;

use super::interpolate::interpolate_pixel;
use super::InterpolationMode;
use surfwarp_image::{Image, ImageError, PixelDepth};

/// Apply generic geometric transformation to an image.
///
/// For every destination pixel the source coordinate is read from `map_x` and `map_y`.
/// Coordinates that are not finite or fall outside `[0, width] × [0, height]` of the source
/// leave the destination pixel untouched, so callers should pre-fill `dst` with a background.
///
/// # Arguments
///
/// * `src` - The input image container with shape (height, width, C).
/// * `dst` - The output image container with shape (height, width, C).
/// * `map_x` - The x coordinates of the pixels to interpolate.
/// * `map_y` - The y coordinates of the pixels to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// * The mapx and mapy must have the same size.
/// * The output image must have the same size as the mapx and mapy.
pub fn remap<T: PixelDepth, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if map_x.size() != map_y.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            map_y.width(),
            map_y.height(),
        ));
    }

    if dst.size() != map_x.size() {
        return Err(ImageError::InvalidImageSize(
            map_x.width(),
            map_x.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if src.width() == 0 || src.height() == 0 {
        return Ok(());
    }

    let (max_x, max_y) = (src.width() as f32, src.height() as f32);

    // parallelize the remap operation by rows
    parallel::par_iter_rows_resample(dst, map_x, map_y, |&x, &y, dst_pixel| {
        // NaN fails both comparisons
        if (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y) {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            dst_pixel.copy_from_slice(&pixel);
        }
    });

    Ok(())
}
