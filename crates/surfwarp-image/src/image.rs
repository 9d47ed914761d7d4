use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use surfwarp_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row by row in a contiguous buffer of shape (H, W, C), where H is the
/// height of the image, W the width and C the number of channels. The size is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use surfwarp_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///      height: 20,
    ///  },
    /// vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        if data.len() != size.area() * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.area() * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use surfwarp_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///    height: 20,
    /// }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.area() * CHANNELS];
        Image::new(size, data)
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Returns
    ///
    /// A new image with the pixel data cast to the given type.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| {
                U::from(x).ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().into()))
            })
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a contiguous slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable contiguous slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return the underlying pixel buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a channel value by its `[row, col, channel]` index.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if y >= self.height() || x >= self.width() || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + c)
    }

    /// Get the channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel lies outside the image, an error is returned.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        let base = self.pixel_offset(x, y)?;
        Ok(&self.data[base..base + CHANNELS])
    }

    /// Get the mutable channel values of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel lies outside the image, an error is returned.
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Result<&mut [T], ImageError> {
        let base = self.pixel_offset(x, y)?;
        Ok(&mut self.data[base..base + CHANNELS])
    }

    /// Get a single channel value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel or the channel is out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        Ok(&self.pixel(x, y)?[ch])
    }

    /// Set a single channel value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the pixel or the channel is out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        self.pixel_mut(x, y)?[ch] = val;
        Ok(())
    }

    fn pixel_offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok((y * self.width() + x) * CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<u16, 4>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u16; 15],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(15, 16)));
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let data = vec![0, 1, 2, 3, 4, 5];
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            data,
        )?;
        assert_eq!(image_u8.get([1, 0, 2]), Some(&5u8));

        let image_u16: Image<u16, 3> = image_u8.cast()?;
        assert_eq!(image_u16.get([1, 0, 2]), Some(&5u16));

        Ok(())
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let mut image = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;

        image.set_pixel(2, 1, 3, 255)?;
        assert_eq!(image.pixel(2, 1)?, &[0, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 1, 3)?, &255);

        assert_eq!(
            image.pixel(3, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert_eq!(
            image.set_pixel(0, 0, 4, 1),
            Err(ImageError::ChannelIndexOutOfBounds(4, 4))
        );

        Ok(())
    }
}
