use lensfx_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::{
    crop::crop_image,
    interpolation::InterpolationMode,
    resize::resize_native,
    template::{match_template_ccoeff, min_max_loc},
};

/// Stitch two overlapping images on top of each other.
///
/// The last `template_rows` rows of `top` are searched for in `bottom` with
/// [`match_template_ccoeff`]. The bottom image is resized to the width of `top` and the rows
/// following the best match are appended below `top`.
///
/// # Arguments
///
/// * `top` - The upper part of the scene.
/// * `bottom` - The lower part of the scene, at least as wide as `top`.
/// * `template_rows` - The number of rows of `top` used as the overlap template.
///
/// # Returns
///
/// An image of width `top.cols()` and height `top.rows() + bottom.rows() - y - template_rows`
/// where `y` is the matched row in `bottom`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if `template_rows` is zero or taller than `top`, or if
/// the template does not fit in `bottom`.
pub fn stitch_vertical<T: ImageDtype, const C: usize>(
    top: &Image<T, C>,
    bottom: &Image<T, C>,
    template_rows: usize,
) -> Result<Image<T, C>, ImageError> {
    if template_rows == 0 || template_rows > top.rows() {
        return Err(ImageError::InvalidInput(format!(
            "cannot take {} template rows from an image of size {}",
            template_rows,
            top.size()
        )));
    }

    let mut templ = Image::from_size_val(
        ImageSize {
            width: top.cols(),
            height: template_rows,
        },
        T::default(),
    )?;
    crop_image(top, &mut templ, 0, top.rows() - template_rows)?;

    let scores = match_template_ccoeff(bottom, &templ)?;
    let best = min_max_loc(&scores);
    let (_, match_y) = best.max_loc;

    log::debug!(
        "overlap template of {} rows matched at {:?} with score {}",
        template_rows,
        best.max_loc,
        best.max_val
    );

    let mut bottom_resized = Image::from_size_val(
        ImageSize {
            width: top.cols(),
            height: bottom.rows(),
        },
        T::default(),
    )?;
    resize_native(bottom, &mut bottom_resized, InterpolationMode::Bilinear)?;

    let tail_start = match_y + template_rows;
    let tail_rows = bottom_resized.rows() - tail_start;

    let mut stitched = Image::from_size_val(
        ImageSize {
            width: top.cols(),
            height: top.rows() + tail_rows,
        },
        T::default(),
    )?;

    let top_len = top.as_slice().len();
    let tail_offset = tail_start * bottom_resized.cols() * C;
    let stitched_data = stitched.as_slice_mut();
    stitched_data[..top_len].copy_from_slice(top.as_slice());
    stitched_data[top_len..].copy_from_slice(&bottom_resized.as_slice()[tail_offset..]);

    Ok(stitched)
}
