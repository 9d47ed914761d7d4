/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes do not match.
    #[error("Invalid image size ({0}, {1}) vs ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a value cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when the channel count or bit depth is not supported.
    #[error("Unsupported pixel format: {channels} channels of {bit_depth} bits")]
    UnsupportedPixelFormat {
        /// number of channels per pixel.
        channels: usize,
        /// number of bits per channel.
        bit_depth: usize,
    },
}
