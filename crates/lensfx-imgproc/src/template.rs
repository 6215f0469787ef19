use lensfx_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::parallel;

/// The extrema of a single channel image and their locations.
///
/// Locations are `(x, y)` pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxLoc {
    /// The minimum value.
    pub min_val: f32,
    /// The maximum value.
    pub max_val: f32,
    /// The location of the first minimum in row-major order.
    pub min_loc: (usize, usize),
    /// The location of the first maximum in row-major order.
    pub max_loc: (usize, usize),
}

/// Slide a template over an image and compute the correlation coefficient score at every
/// position.
///
/// The score at `(x, y)` is the sum over the template footprint and over all channels of the
/// mean-subtracted template times the mean-subtracted image window. Since the template is
/// zero mean, the window mean drops out of the sum.
///
/// # Arguments
///
/// * `image` - The image to search in, of size `(W, H)`.
/// * `templ` - The template to search for, of size `(w, h)`.
///
/// # Returns
///
/// A score map of size `(W - w + 1, H - h + 1)`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if the template is empty or larger than the image.
///
/// # Example
///
/// ```
/// use lensfx_image::Image;
/// use lensfx_imgproc::template::{match_template_ccoeff, min_max_loc};
///
/// let image = Image::<u8, 1>::new([4, 1].into(), vec![0, 0, 10, 0]).unwrap();
/// let templ = Image::<u8, 1>::new([2, 1].into(), vec![0, 10]).unwrap();
///
/// let scores = match_template_ccoeff(&image, &templ).unwrap();
/// assert_eq!(scores.size().width, 3);
/// assert_eq!(min_max_loc(&scores).max_loc, (1, 0));
/// ```
pub fn match_template_ccoeff<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    templ: &Image<T, C>,
) -> Result<Image<f32, 1>, ImageError> {
    if templ.is_empty() || templ.cols() > image.cols() || templ.rows() > image.rows() {
        return Err(ImageError::InvalidInput(format!(
            "template of size {} cannot be matched against an image of size {}",
            templ.size(),
            image.size()
        )));
    }

    // per channel template mean
    let area = templ.size().area() as f64;
    let mut mean = [0.0f64; C];
    templ.as_slice().chunks_exact(C).for_each(|pixel| {
        mean.iter_mut()
            .zip(pixel.iter())
            .for_each(|(m, &v)| *m += Into::<f32>::into(v) as f64);
    });
    mean.iter_mut().for_each(|m| *m /= area);

    let templ_centered = templ
        .as_slice()
        .chunks_exact(C)
        .flat_map(|pixel| {
            pixel
                .iter()
                .zip(mean.iter())
                .map(|(&v, m)| Into::<f32>::into(v) as f64 - m)
        })
        .collect::<Vec<_>>();

    let mut scores = Image::from_size_val(
        ImageSize {
            width: image.cols() - templ.cols() + 1,
            height: image.rows() - templ.rows() + 1,
        },
        0.0f32,
    )?;

    let row_len = templ.cols() * C;
    let image_stride = image.cols() * C;
    let image_data = image.as_slice();

    parallel::par_iter_rows_indexed(&mut scores, |x, y, score| {
        let mut acc = 0.0f64;
        for (ty, templ_row) in templ_centered.chunks_exact(row_len).enumerate() {
            let offset = (y + ty) * image_stride + x * C;
            let window_row = &image_data[offset..offset + row_len];
            acc += templ_row
                .iter()
                .zip(window_row.iter())
                .map(|(&t, &v)| t * Into::<f32>::into(v) as f64)
                .sum::<f64>();
        }
        score[0] = acc as f32;
    });

    Ok(scores)
}

/// Find the minimum and maximum values of a single channel image and their locations.
///
/// Ties resolve to the first occurrence in row-major order. An empty image yields infinite
/// extrema located at the origin.
pub fn min_max_loc(src: &Image<f32, 1>) -> MinMaxLoc {
    let mut result = MinMaxLoc {
        min_val: f32::INFINITY,
        max_val: f32::NEG_INFINITY,
        min_loc: (0, 0),
        max_loc: (0, 0),
    };

    let cols = src.cols();
    for (i, &v) in src.as_slice().iter().enumerate() {
        if v < result.min_val {
            result.min_val = v;
            result.min_loc = (i % cols, i / cols);
        }
        if v > result.max_val {
            result.max_val = v;
            result.max_loc = (i % cols, i / cols);
        }
    }

    result
}
