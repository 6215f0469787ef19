use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use lensfx_image::{Image, ImageDtype};

/// Interpolation mode for the resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Policy for samples that fall outside the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Use a constant value for every out of bounds neighbour.
    Constant(f32),
    /// Use the value of the closest edge pixel.
    Replicate,
}

impl Default for BorderMode {
    fn default() -> Self {
        BorderMode::Constant(0.0)
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - The policy for neighbours outside the image.
///
/// # Returns
///
/// The interpolated pixel values, one per channel.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::interpolation::{interpolate_pixel, BorderMode, InterpolationMode};
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0, 100],
/// ).unwrap();
///
/// let pixel = interpolate_pixel(&image, 0.5, 0.0, InterpolationMode::Bilinear, BorderMode::default());
/// assert_eq!(pixel, [50.0]);
/// ```
pub fn interpolate_pixel<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: BorderMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, border),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, border),
    }
}

/// Read the pixel at the integer position `(iu, iv)` resolving out of bounds positions with
/// the border policy. Returns `None` when the constant border applies.
#[inline]
pub(crate) fn fetch_pixel<T, const C: usize>(
    image: &Image<T, C>,
    iu: i64,
    iv: i64,
    border: BorderMode,
) -> Option<&[T]> {
    let (cols, rows) = (image.cols() as i64, image.rows() as i64);
    let (iu, iv) = match border {
        BorderMode::Replicate => (iu.clamp(0, cols - 1), iv.clamp(0, rows - 1)),
        BorderMode::Constant(_) => {
            if iu < 0 || iv < 0 || iu >= cols || iv >= rows {
                return None;
            }
            (iu, iv)
        }
    };

    let base = (iv as usize * cols as usize + iu as usize) * C;
    image.as_slice().get(base..base + C)
}

/// The value used for neighbours that resolve to the constant border.
#[inline]
pub(crate) fn border_value(border: BorderMode) -> f32 {
    match border {
        BorderMode::Constant(value) => value,
        BorderMode::Replicate => 0.0,
    }
}
