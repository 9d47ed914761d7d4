use crate::padding::PaddingMode;
use surfwarp_image::{Image, PixelDepth};

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: PixelDepth, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [T; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let border = PaddingMode::Reflect101;
    let iu = border.map_index(u.round() as isize, cols).unwrap_or(0);
    let iv = border.map_index(v.round() as isize, rows).unwrap_or(0);

    let base = (iv * cols + iu) * C;

    let mut pixel = [T::default(); C];
    pixel.copy_from_slice(&image.as_slice()[base..base + C]);

    pixel
}

#[cfg(test)]
mod tests {
    use super::nearest_neighbor_interpolation;
    use surfwarp_image::{Image, ImageError, ImageSize};

    #[test]
    fn nearest_rounds_and_reflects() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![1, 2, 3],
        )?;

        assert_eq!(nearest_neighbor_interpolation(&image, 0.4, 0.0), [1]);
        assert_eq!(nearest_neighbor_interpolation(&image, 0.5, 0.0), [2]);
        assert_eq!(nearest_neighbor_interpolation(&image, -1.2, 0.0), [2]);
        assert_eq!(nearest_neighbor_interpolation(&image, 3.0, 0.3), [2]);

        Ok(())
    }
}
