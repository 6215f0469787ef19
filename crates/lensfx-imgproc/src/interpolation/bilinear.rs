use lensfx_image::{Image, ImageDtype};

use super::interpolate::{border_value, fetch_pixel};
use super::BorderMode;

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The policy for neighbours outside the image.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
) -> [f32; C] {
    let (rows, cols) = (image.rows() as f32, image.cols() as f32);
    let fill = border_value(border);

    if image.is_empty() {
        return [fill; C];
    }

    // none of the four neighbours can touch the image
    let outside = !(u > -1.0 && v > -1.0 && u < cols && v < rows);
    let (u, v) = match border {
        BorderMode::Constant(_) if outside => return [fill; C],
        BorderMode::Constant(_) => (u, v),
        BorderMode::Replicate => (
            if u.is_nan() { 0.0 } else { u.clamp(-1.0, cols) },
            if v.is_nan() { 0.0 } else { v.clamp(-1.0, rows) },
        ),
    };

    let (u0, v0) = (u.floor(), v.floor());
    let frac_u = u - u0;
    let frac_v = v - v0;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let (iu0, iv0) = (u0 as i64, v0 as i64);

    let p00 = fetch_pixel(image, iu0, iv0, border);
    let p01 = fetch_pixel(image, iu0 + 1, iv0, border);
    let p10 = fetch_pixel(image, iu0, iv0 + 1, border);
    let p11 = fetch_pixel(image, iu0 + 1, iv0 + 1, border);

    let sample = |p: Option<&[T]>, k: usize| p.map_or(fill, |p| p[k].into());

    let mut pixel = [0.0; C];
    for (k, value) in pixel.iter_mut().enumerate() {
        *value = sample(p00, k) * w00
            + sample(p01, k) * w01
            + sample(p10, k) * w10
            + sample(p11, k) * w11;
    }

    pixel
}
