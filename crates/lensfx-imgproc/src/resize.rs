use crate::interpolation::{grid::meshgrid_image, remap, BorderMode, InterpolationMode};
use lensfx_image::{Image, ImageDtype, ImageError};

/// Resize an image to a new size.
///
/// The function resizes an image to the size of `dst` using the specified interpolation mode.
/// The corner pixels of the source and destination are aligned.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the source image is empty.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::resize::resize_native;
/// use lensfx_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(
///     &image,
///     &mut image_resized,
///     InterpolationMode::Nearest,
/// )
/// .unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot resize an empty image of size {}",
            src.size()
        )));
    }

    // create a grid of x and y coordinates for the output image
    // and interpolate the values from the input image.
    let (map_x, map_y) = meshgrid_image(src.size(), dst.size())?;

    remap(
        src,
        dst,
        &map_x,
        &map_y,
        interpolation,
        BorderMode::Replicate,
    )
}

#[cfg(test)]
mod tests {
    use crate::interpolation::InterpolationMode;
    use lensfx_image::{Image, ImageError, ImageSize};

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size(), new_size);

        Ok(())
    }

    #[test]
    fn resize_downscale_corners() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|v| v as f32).collect(),
        )?;

        let mut image_resized = Image::<_, 1>::from_size_val([2, 2].into(), 0.0)?;
        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.as_slice(), &[0.0, 3.0, 12.0, 15.0]);

        Ok(())
    }

    #[test]
    fn resize_upscale_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 1].into(), vec![0, 100])?;
        let mut image_resized = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;
        assert_eq!(image_resized.as_slice(), &[0, 50, 100, 0, 50, 100]);
        Ok(())
    }

    #[test]
    fn resize_same_size_is_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new([3, 2].into(), (0..18).collect())?;
        let mut image_resized = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::resize_native(&image, &mut image_resized, InterpolationMode::Bilinear)?;
        assert_eq!(image_resized, image);
        Ok(())
    }
}
