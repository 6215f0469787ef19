use std::path::Path;

use lensfx_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path and converts it to 8-bit RGB.
///
/// The method tries to read from any image format supported by the image crate. The format is
/// guessed from the file contents, and grayscale or alpha images are expanded or flattened to
/// three channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the image data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if there is no file at the path, or a decoding error if
/// the file is not a supported image.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {} from {}", size, file_path.display());

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

fn dimensions(size: ImageSize) -> Result<(u32, u32), IoError> {
    let width = u32::try_from(size.width).map_err(|_| IoError::ImageTooLarge(size))?;
    let height = u32::try_from(size.height).map_err(|_| IoError::ImageTooLarge(size))?;
    Ok((width, height))
}

/// Writes an 8-bit RGB image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path of the PNG file to write.
/// * `image` - The image to encode.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let (width, height) = dimensions(image.size())?;
    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        width,
        height,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Writes an 8-bit grayscale image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path of the PNG file to write.
/// * `image` - The image to encode.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let (width, height) = dimensions(image.size())?;
    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        width,
        height,
        image::ExtendedColorType::L8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}
