use lensfx_image::{Image, ImageError, ImageSize};

/// Create a pair of coordinate maps from a function of the output pixel position.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps an output pixel `(x, y)` to the source coordinates to sample from.
///
/// # Returns
///
/// A tuple of single channel images of shape (rows, cols) with the x and y coordinates.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::interpolation::grid::meshgrid_from_fn;
///
/// let (map_x, map_y) = meshgrid_from_fn(3, 2, |x, y| Ok((x as f32 * 2.0, y as f32))).unwrap();
///
/// assert_eq!(map_x.as_slice(), &[0.0, 2.0, 4.0, 0.0, 2.0, 4.0]);
/// assert_eq!(map_y.as_slice(), &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// ```
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> Result<(f32, f32), ImageError>,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            let (u, v) = f(x, y)?;
            map_x.push(u);
            map_y.push(v);
        }
    }

    let size = ImageSize {
        width: cols,
        height: rows,
    };

    Ok((Image::new(size, map_x)?, Image::new(size, map_y)?))
}

/// Create a meshgrid that spans a source image of size `src` with `dst` samples per axis.
///
/// The first and last samples of every axis are aligned with the corner pixels of the source.
pub(crate) fn meshgrid_image(
    src: ImageSize,
    dst: ImageSize,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let step = |src_len: usize, dst_len: usize| {
        if dst_len > 1 {
            src_len.saturating_sub(1) as f32 / (dst_len - 1) as f32
        } else {
            0.0
        }
    };

    let step_x = step(src.width, dst.width);
    let step_y = step(src.height, dst.height);

    meshgrid_from_fn(dst.width, dst.height, |x, y| {
        Ok((x as f32 * step_x, y as f32 * step_y))
    })
}
