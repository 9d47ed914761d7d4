use rayon::prelude::*;
use surfwarp_image::{DynamicImage, Image, ImageError, ImageSize, PixelDepth};

/// A border type for index mapping and spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// This border type fills the border with a single, constant color value.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    #[default]
    Reflect101,

    /// This border type reflects the pixel values at the boundary, starting with the edge pixel itself.
    ///
    /// Example: ...d c b a | a b c d...
    Reflect,

    /// This border type wraps the content from the opposite side to fill the border.
    ///
    /// Example: ...d c b a | w x y z...
    Wrap,
}

impl PaddingMode {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        let period = 2 * len as isize;
        let r = i.rem_euclid(period) as usize;
        if r < len {
            r
        } else {
            2 * len - 1 - r
        }
    }

    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let period = 2 * len as isize - 2;
        let r = i.rem_euclid(period) as usize;
        if r < len {
            r
        } else {
            2 * len - 2 - r
        }
    }

    #[inline]
    fn wrap(i: isize, len: usize) -> usize {
        i.rem_euclid(len as isize) as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect`: mirror including edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Wrap`: circular wrap
    /// - `Constant`: returns `None` for indices outside the range
    ///
    /// # Arguments
    /// - `i`: The (possibly out-of-range) coordinate index.
    /// - `len`: The valid length of the dimension, greater than zero.
    ///
    /// # Returns
    /// A valid mapped index within `[0, len)`, or `None` when `len` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use surfwarp_imgproc::padding::PaddingMode;
    ///
    /// assert_eq!(PaddingMode::Reflect101.map_index(-1, 5), Some(1));
    /// assert_eq!(PaddingMode::Reflect101.map_index(5, 5), Some(3));
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }
        match self {
            PaddingMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            PaddingMode::Reflect => Some(Self::reflect(i, len)),
            PaddingMode::Reflect101 => Some(Self::reflect101(i, len)),
            PaddingMode::Wrap => Some(Self::wrap(i, len)),
            PaddingMode::Constant => None,
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same padding on every side.
    pub fn uniform(pad: usize) -> Self {
        Self {
            top: pad,
            bottom: pad,
            left: pad,
            right: pad,
        }
    }

    /// The size of an image of `size` after this padding is applied.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Pad an image with a border, producing a new larger image.
///
/// Used by callers to give a projection model extra margin before it runs.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `padding` - The border extents in pixels.
/// * `mode` - How the border pixels are filled.
/// * `constant_value` - The pixel used by [`PaddingMode::Constant`].
///
/// # Errors
///
/// If the source image is empty and the mode needs source pixels, an error is returned.
///
/// # Example
///
/// ```
/// use surfwarp_image::{Image, ImageSize};
/// use surfwarp_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let padded = spatial_padding(
///     &image,
///     Padding2D { top: 0, bottom: 0, left: 2, right: 2 },
///     PaddingMode::Reflect101,
///     [0],
/// )
/// .unwrap();
///
/// assert_eq!(padded.as_slice(), &[3, 2, 1, 2, 3, 2, 1]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    padding: Padding2D,
    mode: PaddingMode,
    constant_value: [T; C],
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let new_size = padding.padded_size(src.size());
    let (old_width, old_height) = (src.width(), src.height());

    if mode != PaddingMode::Constant && (old_width == 0 || old_height == 0) {
        return Err(ImageError::InvalidImageSize(
            old_width,
            old_height,
            new_size.width,
            new_size.height,
        ));
    }

    let mut dst = Image::from_size_val(new_size, constant_value[0])?;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(new_size.width * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_y = mode.map_index(y as isize - padding.top as isize, old_height);
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| {
                    let src_x = mode.map_index(x as isize - padding.left as isize, old_width);
                    match (src_x, src_y) {
                        (Some(sx), Some(sy)) => {
                            let base = (sy * old_width + sx) * C;
                            dst_pixel.copy_from_slice(&src_data[base..base + C]);
                        }
                        _ => dst_pixel.copy_from_slice(&constant_value),
                    }
                });
        });

    Ok(dst)
}

/// Pad an image whose pixel format is only known at runtime.
///
/// [`PaddingMode::Constant`] fills the border with zeros.
///
/// # Errors
///
/// The errors of [`spatial_padding`].
pub fn spatial_padding_dynamic(
    src: &DynamicImage,
    padding: Padding2D,
    mode: PaddingMode,
) -> Result<DynamicImage, ImageError> {
    fn pad<T: PixelDepth, const C: usize>(
        src: &Image<T, C>,
        padding: Padding2D,
        mode: PaddingMode,
    ) -> Result<Image<T, C>, ImageError> {
        spatial_padding(src, padding, mode, [T::default(); C])
    }

    let dst = match src {
        DynamicImage::Rgb8(image) => DynamicImage::Rgb8(pad(image, padding, mode)?),
        DynamicImage::Rgba8(image) => DynamicImage::Rgba8(pad(image, padding, mode)?),
        DynamicImage::Rgb16(image) => DynamicImage::Rgb16(pad(image, padding, mode)?),
        DynamicImage::Rgba16(image) => DynamicImage::Rgba16(pad(image, padding, mode)?),
    };

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_len1_len2_len5() {
        let mode = PaddingMode::Reflect101;

        for i in -8..=8 {
            assert_eq!(mode.map_index(i, 1), Some(0));
        }

        let expected_len2 = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for (offset, expected) in (-4..=4).zip(expected_len2) {
            assert_eq!(mode.map_index(offset, 2), Some(expected));
        }

        let cases_len5 = [
            (-7, 1),
            (-6, 2),
            (-5, 3),
            (-4, 4),
            (-3, 3),
            (-2, 2),
            (-1, 1),
            (0, 0),
            (4, 4),
            (5, 3),
            (6, 2),
            (9, 1),
            (12, 4),
        ];
        for (i, expected) in cases_len5 {
            assert_eq!(mode.map_index(i, 5), Some(expected), "index {i}");
        }
    }

    #[test]
    fn other_modes() {
        assert_eq!(PaddingMode::Replicate.map_index(-3, 4), Some(0));
        assert_eq!(PaddingMode::Replicate.map_index(7, 4), Some(3));
        assert_eq!(PaddingMode::Reflect.map_index(-1, 4), Some(0));
        assert_eq!(PaddingMode::Reflect.map_index(4, 4), Some(3));
        assert_eq!(PaddingMode::Reflect.map_index(-5, 4), Some(3));
        assert_eq!(PaddingMode::Wrap.map_index(-1, 4), Some(3));
        assert_eq!(PaddingMode::Wrap.map_index(9, 4), Some(1));
        assert_eq!(PaddingMode::Constant.map_index(-1, 4), None);
        assert_eq!(PaddingMode::Constant.map_index(2, 4), Some(2));
        assert_eq!(PaddingMode::Reflect101.map_index(0, 0), None);
    }

    #[test]
    fn reflect101_far_out_of_range() {
        let mode = PaddingMode::Reflect101;
        // period is 8 for len 5
        assert_eq!(mode.map_index(1_000_001, 5), Some(1));
        assert_eq!(mode.map_index(-1_000_001, 5), Some(1));
    }

    #[test]
    fn padding_constant() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 1,
                height: 1,
            },
            vec![7, 8],
        )?;

        let padded = spatial_padding(&image, Padding2D::uniform(1), PaddingMode::Constant, [1, 2])?;

        assert_eq!(padded.size(), ImageSize { width: 3, height: 3 });
        assert_eq!(padded.pixel(1, 1)?, &[7, 8]);
        assert_eq!(padded.pixel(0, 0)?, &[1, 2]);
        assert_eq!(padded.pixel(2, 1)?, &[1, 2]);

        Ok(())
    }

    #[test]
    fn padding_replicate_rows() -> Result<(), ImageError> {
        let image = Image::<u16, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;

        let padding = Padding2D {
            top: 1,
            bottom: 1,
            left: 0,
            right: 1,
        };
        let padded = spatial_padding(&image, padding, PaddingMode::Replicate, [0])?;

        #[rustfmt::skip]
        let expected = vec![
            1, 2, 2,
            1, 2, 2,
            3, 4, 4,
            3, 4, 4,
        ];
        assert_eq!(padded.as_slice(), expected);

        Ok(())
    }

    #[test]
    fn padding_dynamic_keeps_format() -> Result<(), ImageError> {
        let image = DynamicImage::Rgb16(Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?);

        let padded = spatial_padding_dynamic(&image, Padding2D::uniform(1), PaddingMode::Constant)?;
        assert_eq!(padded.format(), image.format());
        assert_eq!(padded.size(), ImageSize { width: 4, height: 3 });

        let DynamicImage::Rgb16(padded) = padded else {
            panic!("expected a 16-bit RGB image");
        };
        assert_eq!(padded.pixel(0, 0)?, &[0, 0, 0]);
        assert_eq!(padded.pixel(2, 1)?, &[4, 5, 6]);

        Ok(())
    }

    #[test]
    fn padding_empty_source() {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )
        .unwrap();
        let res = spatial_padding(&image, Padding2D::uniform(1), PaddingMode::Reflect101, [0]);
        assert!(res.is_err());
    }
}
