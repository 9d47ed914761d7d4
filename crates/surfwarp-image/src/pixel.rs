use crate::error::ImageError;

/// Trait for the scalar type of a single pixel channel.
///
/// Send and Sync are required to resample rows in parallel.
pub trait PixelDepth: Copy + Default + Into<f32> + Send + Sync + 'static {
    /// Number of bits per channel.
    const BIT_DEPTH: usize;

    /// Convert a f32 value to the channel type.
    ///
    /// Integer channels round half away from zero and saturate at the range of the type.
    fn from_f32(x: f32) -> Self;
}

impl PixelDepth for f32 {
    const BIT_DEPTH: usize = 32;

    fn from_f32(x: f32) -> Self {
        x
    }
}

impl PixelDepth for u8 {
    const BIT_DEPTH: usize = 8;

    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, u8::MAX as f32) as u8
    }
}

impl PixelDepth for u16 {
    const BIT_DEPTH: usize = 16;

    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// Channel count and bit depth of an image buffer handed over at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    channels: usize,
    bit_depth: usize,
}

impl PixelFormat {
    /// Create a pixel format, rejecting anything outside {8, 16} bits × {3, 4} channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use surfwarp_image::PixelFormat;
    ///
    /// assert!(PixelFormat::new(4, 16).is_ok());
    /// assert!(PixelFormat::new(2, 8).is_err());
    /// ```
    pub fn new(channels: usize, bit_depth: usize) -> Result<Self, ImageError> {
        match (channels, bit_depth) {
            (3 | 4, 8 | 16) => Ok(Self {
                channels,
                bit_depth,
            }),
            _ => Err(ImageError::UnsupportedPixelFormat {
                channels,
                bit_depth,
            }),
        }
    }

    pub(crate) const fn new_unchecked(channels: usize, bit_depth: usize) -> Self {
        Self {
            channels,
            bit_depth,
        }
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of bits per channel.
    pub fn bit_depth(&self) -> usize {
        self.bit_depth
    }

    /// Number of bytes used by one pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels * self.bit_depth / 8
    }
}
