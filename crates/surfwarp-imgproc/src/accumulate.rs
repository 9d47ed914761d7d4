use surfwarp_image::{Image, ImageError, PixelDepth};

/// Running mean of every contribution written to a destination pixel.
///
/// Forward mapping is not injective: several source pixels can land on the same destination
/// pixel. Each hit is blended into a per-pixel `f64` mean so every contribution has equal
/// weight regardless of arrival order, and the destination always holds the mean rounded once
/// to the channel type. The hit counts live only as long as the accumulator.
///
/// # Example
///
/// ```
/// use surfwarp_image::{Image, ImageSize};
/// use surfwarp_imgproc::accumulate::Accumulator;
///
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 1, height: 1 }, 0).unwrap();
/// let mut acc = Accumulator::new(&mut dst);
///
/// for value in [10, 20, 30] {
///     acc.accumulate(0, 0, &[value]).unwrap();
/// }
/// assert_eq!(acc.count(0, 0), Some(3));
/// drop(acc);
///
/// assert_eq!(dst.as_slice(), &[20]);
/// ```
pub struct Accumulator<'a, T, const C: usize> {
    dst: &'a mut Image<T, C>,
    counts: Vec<u32>,
    means: Vec<f64>,
}

impl<'a, T: PixelDepth, const C: usize> Accumulator<'a, T, C> {
    /// Start accumulating into `dst` with every hit count at zero.
    pub fn new(dst: &'a mut Image<T, C>) -> Self {
        let num_pixels = dst.size().area();
        Self {
            dst,
            counts: vec![0; num_pixels],
            means: vec![0.0; num_pixels * C],
        }
    }

    /// Blend `value` into the destination pixel at `(x, y)`.
    ///
    /// The first hit stores `value` unchanged; later hits update the mean as
    /// `(value + count · mean) / (count + 1)`.
    ///
    /// # Errors
    ///
    /// If `(x, y)` lies outside the destination, an error is returned.
    pub fn accumulate(&mut self, x: usize, y: usize, value: &[T; C]) -> Result<(), ImageError> {
        let width = self.dst.width();
        let pixel = self.dst.pixel_mut(x, y)?;
        let index = y * width + x;

        let count = self.counts[index];
        let means = &mut self.means[index * C..(index + 1) * C];

        for ((mean, out), &new) in means.iter_mut().zip(pixel.iter_mut()).zip(value.iter()) {
            let new = Into::<f32>::into(new) as f64;
            *mean = if count == 0 {
                new
            } else {
                (new + count as f64 * *mean) / (count as f64 + 1.0)
            };
            *out = T::from_f32(*mean as f32);
        }

        self.counts[index] = count.saturating_add(1);

        Ok(())
    }

    /// Number of contributions received by the pixel at `(x, y)`.
    pub fn count(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.dst_width() || y >= self.dst_height() {
            return None;
        }
        self.counts.get(y * self.dst_width() + x).copied()
    }

    /// Number of destination pixels that received no contribution.
    pub fn holes(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    fn dst_width(&self) -> usize {
        self.dst.width()
    }

    fn dst_height(&self) -> usize {
        self.dst.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfwarp_image::ImageSize;

    fn single_pixel() -> Result<Image<u8, 1>, ImageError> {
        Image::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            0,
        )
    }

    #[test]
    fn single_contribution_is_exact() -> Result<(), ImageError> {
        let mut dst = Image::<u16, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        let mut acc = Accumulator::new(&mut dst);
        acc.accumulate(1, 0, &[1, 40_001, 65_535])?;
        assert_eq!(acc.count(1, 0), Some(1));
        assert_eq!(acc.count(0, 0), Some(0));
        assert_eq!(acc.holes(), 3);

        assert_eq!(dst.pixel(1, 0)?, &[1, 40_001, 65_535]);
        assert_eq!(dst.pixel(0, 0)?, &[0, 0, 0]);

        Ok(())
    }

    #[test]
    fn running_mean() -> Result<(), ImageError> {
        let mut dst = single_pixel()?;
        let mut acc = Accumulator::new(&mut dst);
        for value in [10, 20, 30] {
            acc.accumulate(0, 0, &[value])?;
        }
        assert_eq!(dst.as_slice(), &[20]);
        Ok(())
    }

    #[test]
    fn running_mean_is_order_independent() -> Result<(), ImageError> {
        for order in [[30, 10, 20], [20, 30, 10], [10, 30, 20]] {
            let mut dst = single_pixel()?;
            let mut acc = Accumulator::new(&mut dst);
            for value in order {
                acc.accumulate(0, 0, &[value])?;
            }
            assert_eq!(dst.as_slice(), &[20]);
        }
        Ok(())
    }

    #[test]
    fn mean_rounds_once() -> Result<(), ImageError> {
        // 1, 2, 2 averages to 1.67; truncating an intermediate would give 1
        let mut dst = single_pixel()?;
        let mut acc = Accumulator::new(&mut dst);
        for value in [1, 2, 2] {
            acc.accumulate(0, 0, &[value])?;
        }
        assert_eq!(dst.as_slice(), &[2]);
        Ok(())
    }

    #[test]
    fn out_of_bounds_target() -> Result<(), ImageError> {
        let mut dst = single_pixel()?;
        let mut acc = Accumulator::new(&mut dst);
        assert_eq!(
            acc.accumulate(1, 0, &[5]),
            Err(ImageError::PixelIndexOutOfBounds(1, 0, 1, 1))
        );
        assert_eq!(acc.count(0, 1), None);
        Ok(())
    }
}
