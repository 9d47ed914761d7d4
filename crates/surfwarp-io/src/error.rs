/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] surfwarp_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The pixel buffer does not fit the image dimensions.
    #[error("Pixel buffer of {width}x{height} image has the wrong length")]
    InvalidBuffer {
        /// Width of the image.
        width: usize,
        /// Height of the image.
        height: usize,
    },
}
