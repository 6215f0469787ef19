use lensfx_image::{Image, ImageDtype};

use super::interpolate::{border_value, fetch_pixel};
use super::BorderMode;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The policy for positions outside the image.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
) -> [f32; C] {
    let fill = border_value(border);

    if image.is_empty() || u.is_nan() || v.is_nan() {
        return [fill; C];
    }

    // saturating casts keep infinite coordinates out of bounds
    let iu = u.round() as i64;
    let iv = v.round() as i64;

    let mut pixel = [fill; C];
    if let Some(src) = fetch_pixel(image, iu, iv, border) {
        for (dst, src) in pixel.iter_mut().zip(src.iter()) {
            *dst = (*src).into();
        }
    }

    pixel
}
