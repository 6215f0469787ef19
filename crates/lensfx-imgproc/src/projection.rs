use lensfx_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Compute the vertical projection of a grayscale image.
///
/// Each entry is the sum of the intensities of one column.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::projection::vertical_projection;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 3, height: 2 },
///     vec![1, 2, 3, 4, 5, 6],
/// ).unwrap();
///
/// assert_eq!(vertical_projection(&image), vec![5.0, 7.0, 9.0]);
/// ```
pub fn vertical_projection(src: &Image<u8, 1>) -> Vec<f32> {
    let cols = src.cols();
    if src.is_empty() {
        return vec![0.0; cols];
    }

    src.as_slice()
        .par_chunks_exact(cols)
        .fold(
            || vec![0.0f32; cols],
            |mut acc, row| {
                acc.iter_mut()
                    .zip(row.iter())
                    .for_each(|(a, &v)| *a += v as f32);
                acc
            },
        )
        .reduce(
            || vec![0.0f32; cols],
            |mut a, b| {
                a.iter_mut().zip(b.iter()).for_each(|(a, b)| *a += b);
                a
            },
        )
}

/// Get the intensity profile along one row of a grayscale image.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if the row is out of bounds.
pub fn row_profile(src: &Image<u8, 1>, row: usize) -> Result<Vec<f32>, ImageError> {
    if row >= src.rows() {
        return Err(ImageError::InvalidInput(format!(
            "row {} is out of bounds for an image with {} rows",
            row,
            src.rows()
        )));
    }

    let cols = src.cols();
    Ok(src.as_slice()[row * cols..(row + 1) * cols]
        .iter()
        .map(|&v| v as f32)
        .collect())
}

/// Get the intensity profile along the central row of a grayscale image.
pub fn center_row_profile(src: &Image<u8, 1>) -> Result<Vec<f32>, ImageError> {
    row_profile(src, src.rows() / 2)
}

/// Linearly rescale the values so that they span `[min, max]`.
///
/// A constant input maps every value to `min`.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::projection::normalize_min_max;
///
/// let values = normalize_min_max(&[2.0, 4.0, 6.0], 0.0, 255.0);
/// assert_eq!(values, vec![0.0, 127.5, 255.0]);
/// ```
pub fn normalize_min_max(values: &[f32], min: f32, max: f32) -> Vec<f32> {
    let (lo, hi) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let range = hi - lo;
    if range.is_nan() || range <= 0.0 {
        return vec![min; values.len()];
    }

    let scale = (max - min) / range;
    values.iter().map(|&v| (v - lo) * scale + min).collect()
}

/// Render a sequence of values as a bar plot.
///
/// The canvas is white with one black bar per column going from the bottom row up to
/// `height - 1 - value`. Values are truncated and clamped to the canvas height.
///
/// # Arguments
///
/// * `values` - One value per column of the plot.
/// * `height` - The height of the canvas in pixels.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::projection::draw_bar_plot;
///
/// let plot = draw_bar_plot(&[0.0, 2.0], 3).unwrap();
///
/// assert_eq!(plot.as_slice(), &[255, 0, 255, 0, 0, 0]);
/// ```
pub fn draw_bar_plot(values: &[f32], height: usize) -> Result<Image<u8, 1>, ImageError> {
    let size = ImageSize {
        width: values.len(),
        height,
    };
    let mut plot = Image::from_size_val(size, 255u8)?;

    if size.is_empty() {
        return Ok(plot);
    }

    let bottom = (height - 1) as f32;
    let tops = values
        .iter()
        .map(|&v| (bottom - v.max(0.0).trunc()).max(0.0) as usize)
        .collect::<Vec<_>>();

    let cols = size.width;
    plot.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, row)| {
            row.iter_mut()
                .zip(tops.iter())
                .filter(|(_, &top)| y >= top)
                .for_each(|(pixel, _)| *pixel = 0);
        });

    Ok(plot)
}
