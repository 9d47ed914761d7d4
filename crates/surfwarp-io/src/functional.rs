use std::path::Path;

use image::{ImageBuffer, Rgb, Rgba};
use surfwarp_image::{DynamicImage, Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path.
///
/// The method reads from any image format supported by the image crate. The pixels are
/// converted to RGB, or RGBA when the file carries an alpha channel, keeping 8 bits per
/// channel for 8-bit files and 16 bits otherwise.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<DynamicImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(&file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap[..]))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let color = img.color();
    let is_8bit = color.bytes_per_pixel() == color.channel_count();

    log::debug!(
        "read {} ({size}, {color:?})",
        file_path.display(),
    );

    let image = match (color.has_alpha(), is_8bit) {
        (false, true) => DynamicImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        (true, true) => DynamicImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
        (false, false) => DynamicImage::Rgb16(Image::new(size, img.into_rgb16().into_raw())?),
        (true, false) => DynamicImage::Rgba16(Image::new(size, img.into_rgba16().into_raw())?),
    };

    Ok(image)
}

/// Writes the given image to the given file path.
///
/// The format is picked from the file extension. Not every format accepts 16-bit channels,
/// PNG and TIFF do.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `image` - The image to write.
pub fn write_image(file_path: impl AsRef<Path>, image: &DynamicImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let size = image.size();
    let (width, height) = (size.width as u32, size.height as u32);
    let invalid = || IoError::InvalidBuffer {
        width: size.width,
        height: size.height,
    };

    match image {
        DynamicImage::Rgb8(image) => {
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, image.as_slice().to_vec())
                .ok_or_else(invalid)?
                .save(file_path)?
        }
        DynamicImage::Rgba8(image) => {
            ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, image.as_slice().to_vec())
                .ok_or_else(invalid)?
                .save(file_path)?
        }
        DynamicImage::Rgb16(image) => {
            ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, image.as_slice().to_vec())
                .ok_or_else(invalid)?
                .save(file_path)?
        }
        DynamicImage::Rgba16(image) => {
            ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, image.as_slice().to_vec())
                .ok_or_else(invalid)?
                .save(file_path)?
        }
    }

    log::debug!("wrote {} ({size})", file_path.display());

    Ok(())
}
