use crate::{error::ImageError, Image, ImageSize, PixelFormat};

/// An image whose channel count and bit depth are decided at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicImage {
    /// 8-bit RGB image.
    Rgb8(Image<u8, 3>),
    /// 8-bit RGBA image.
    Rgba8(Image<u8, 4>),
    /// 16-bit RGB image.
    Rgb16(Image<u16, 3>),
    /// 16-bit RGBA image.
    Rgba16(Image<u16, 4>),
}

impl DynamicImage {
    /// Create an image from a raw pixel-major, row-contiguous byte buffer.
    ///
    /// 16-bit channels are read as native-endian byte pairs.
    ///
    /// # Errors
    ///
    /// If the buffer length does not match `size` and `format`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use surfwarp_image::{DynamicImage, ImageSize, PixelFormat};
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let format = PixelFormat::new(3, 8).unwrap();
    /// let image = DynamicImage::from_bytes(size, format, &[1, 2, 3, 4, 5, 6]).unwrap();
    ///
    /// assert_eq!(image.format(), format);
    /// assert_eq!(image.into_bytes(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_bytes(
        size: ImageSize,
        format: PixelFormat,
        bytes: &[u8],
    ) -> Result<Self, ImageError> {
        let expected = size.area() * format.bytes_per_pixel();
        if bytes.len() != expected {
            return Err(ImageError::InvalidChannelShape(bytes.len(), expected));
        }

        let image = match (format.channels(), format.bit_depth()) {
            (3, 8) => DynamicImage::Rgb8(Image::new(size, bytes.to_vec())?),
            (4, 8) => DynamicImage::Rgba8(Image::new(size, bytes.to_vec())?),
            (3, 16) => DynamicImage::Rgb16(Image::new(size, bytes_to_u16(bytes))?),
            (4, 16) => DynamicImage::Rgba16(Image::new(size, bytes_to_u16(bytes))?),
            (channels, bit_depth) => {
                return Err(ImageError::UnsupportedPixelFormat {
                    channels,
                    bit_depth,
                })
            }
        };

        Ok(image)
    }

    /// Create an image from a raw byte buffer described by its channel count and bit depth.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::UnsupportedPixelFormat`] for anything other than 3 or 4 channels
    /// of 8 or 16 bits, and the errors of [`DynamicImage::from_bytes`].
    pub fn from_raw(
        size: ImageSize,
        channels: usize,
        bit_depth: usize,
        data: &[u8],
    ) -> Result<Self, ImageError> {
        Self::from_bytes(size, PixelFormat::new(channels, bit_depth)?, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynamicImage::Rgb8(image) => image.size(),
            DynamicImage::Rgba8(image) => image.size(),
            DynamicImage::Rgb16(image) => image.size(),
            DynamicImage::Rgba16(image) => image.size(),
        }
    }

    /// Get the pixel format of the image.
    pub fn format(&self) -> PixelFormat {
        let (channels, bit_depth) = match self {
            DynamicImage::Rgb8(_) => (3, 8),
            DynamicImage::Rgba8(_) => (4, 8),
            DynamicImage::Rgb16(_) => (3, 16),
            DynamicImage::Rgba16(_) => (4, 16),
        };
        PixelFormat::new_unchecked(channels, bit_depth)
    }

    /// Consume the image and return its pixels as a byte buffer in the layout of `from_bytes`.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            DynamicImage::Rgb8(image) => image.into_vec(),
            DynamicImage::Rgba8(image) => image.into_vec(),
            DynamicImage::Rgb16(image) => u16_to_bytes(&image.into_vec()),
            DynamicImage::Rgba16(image) => u16_to_bytes(&image.into_vec()),
        }
    }
}

fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect()
}

fn u16_to_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}
