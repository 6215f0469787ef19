use lensfx_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, remap, BorderMode, InterpolationMode};

#[rustfmt::skip]
fn determinant3x3(m: &[f32; 9]) -> f32 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f32; 9]) -> [f32; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

fn inverse_perspective_matrix(m: &[f32; 9]) -> Result<[f32; 9], ImageError> {
    let det = determinant3x3(m);

    if det == 0.0 {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let adj = adjugate3x3(m);
    let inv_det = 1.0 / det;

    Ok(adj.map(|v| v * inv_det))
}

fn transform_point(x: f32, y: f32, m: &[f32; 9]) -> (f32, f32) {
    let w = m[6] * x + m[7] * y + m[8];
    let u = (m[0] * x + m[1] * y + m[2]) / w;
    let v = (m[3] * x + m[4] * y + m[5]) / w;
    (u, v)
}

/// Computes the perspective transformation that maps four source points onto four destination
/// points.
///
/// # Arguments
///
/// * `src` - The quadrilateral vertices in the source image.
/// * `dst` - The corresponding vertices in the destination image.
///
/// # Returns
///
/// The 3x3 homography src -> dst normalized so that its last element is `1.0`.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if a point is repeated or three of the
/// points are collinear.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::warp::get_perspective_transform;
///
/// let src = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// let dst = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
///
/// let m = get_perspective_transform(&src, &dst).unwrap();
/// assert!((m[0] - 2.0).abs() < 1e-6);
/// assert!((m[4] - 2.0).abs() < 1e-6);
/// ```
pub fn get_perspective_transform(
    src: &[(f32, f32); 4],
    dst: &[(f32, f32); 4],
) -> Result<[f32; 9], ImageError> {
    // construct the DLT matrix A with A * h = 0
    let mut mat_a = faer::Mat::<f64>::zeros(8, 9);
    for (i, (&(x, y), &(u, v))) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y, u, v) = (x as f64, y as f64, u as f64, v as f64);

        mat_a.write(2 * i, 0, x);
        mat_a.write(2 * i, 1, y);
        mat_a.write(2 * i, 2, 1.0);
        mat_a.write(2 * i, 6, -u * x);
        mat_a.write(2 * i, 7, -u * y);
        mat_a.write(2 * i, 8, -u);

        mat_a.write(2 * i + 1, 3, x);
        mat_a.write(2 * i + 1, 4, y);
        mat_a.write(2 * i + 1, 5, 1.0);
        mat_a.write(2 * i + 1, 6, -v * x);
        mat_a.write(2 * i + 1, 7, -v * y);
        mat_a.write(2 * i + 1, 8, -v);
    }

    // the solution is the right singular vector of the smallest singular value
    let svd = mat_a.svd();
    let h = svd.v().col(8);

    // a vanishing h[8] sends the origin to infinity, which happens with degenerate point sets
    if h[8].abs() < 1e-10 {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let homo = faer::Mat::<f64>::from_fn(3, 3, |i, j| h[i * 3 + j] / h[8]);
    if homo.determinant().abs() < 1e-8 {
        return Err(ImageError::CannotComputeDeterminant);
    }

    let mut m = [0.0f32; 9];
    for (k, value) in m.iter_mut().enumerate() {
        *value = homo.read(k / 3, k % 3) as f32;
    }

    Ok(m)
}

/// Applies a perspective transformation to an image.
///
/// Destination pixels whose preimage falls outside of the source are set to zero.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if the matrix is singular.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::interpolation::InterpolationMode;
/// use lensfx_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0.0f32; 4 * 5]
/// ).unwrap();
///
/// let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   0.0
/// ).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 9],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    let inv_m = inverse_perspective_matrix(m)?;

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        Ok(transform_point(x as f32, y as f32, &inv_m))
    })?;

    remap(
        src,
        dst,
        &map_x,
        &map_y,
        interpolation,
        BorderMode::Constant(0.0),
    )
}

#[cfg(test)]
mod tests {
    use crate::interpolation::InterpolationMode;
    use lensfx_image::{Image, ImageError, ImageSize};

    #[test]
    fn inverse_perspective_matrix() -> Result<(), ImageError> {
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        let expected = [1.0, 0.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0];
        let inv_m = super::inverse_perspective_matrix(&m)?;
        assert_eq!(inv_m, expected);
        Ok(())
    }

    #[test]
    fn inverse_singular_matrix() {
        let m = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0];
        assert_eq!(
            super::inverse_perspective_matrix(&m),
            Err(ImageError::CannotComputeDeterminant)
        );
    }

    #[test]
    fn transform_point() {
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
        let (x, y) = super::transform_point(1.0, 1.0, &m);
        assert_eq!((x, y), (0.0, 2.0));

        // the homogeneous coordinate divides both axes
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0];
        assert_eq!(super::transform_point(4.0, 6.0, &m), (2.0, 3.0));
    }

    #[test]
    fn warp_perspective_hflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0],
        )?;

        let image_expected = vec![1.0, 0.0, 3.0, 2.0, 5.0, 4.0];

        // flip matrix
        let m = [-1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), image_expected);

        Ok(())
    }

    #[test]
    fn warp_perspective_shift() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|v| v as f32).collect(),
        )?;

        // shift left by 1 pixel
        let m = [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let image_expected = vec![
            1.0f32, 2.0, 3.0, 0.0, 5.0, 6.0, 7.0, 0.0, 9.0, 10.0, 11.0, 0.0, 13.0, 14.0, 15.0, 0.0,
        ];

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_perspective(
            &image,
            &mut image_transformed,
            &m,
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.as_slice(), image_expected);

        Ok(())
    }

    #[test]
    fn get_perspective_transform_recovers_homography() -> Result<(), ImageError> {
        let h = [1.2, 0.1, 5.0, 0.05, 0.9, 3.0, 0.001, 0.002, 1.0];
        let src = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
        let dst = src.map(|(x, y)| super::transform_point(x, y, &h));

        let estimated = super::get_perspective_transform(&src, &dst)?;
        for (a, b) in estimated.iter().zip(h.iter()) {
            approx::assert_relative_eq!(a, b, epsilon = 1e-4, max_relative = 1e-3);
        }

        // the estimated matrix maps the source corners onto the destination ones
        for (s, d) in src.iter().zip(dst.iter()) {
            let (u, v) = super::transform_point(s.0, s.1, &estimated);
            approx::assert_relative_eq!(u, d.0, epsilon = 1e-2);
            approx::assert_relative_eq!(v, d.1, epsilon = 1e-2);
        }

        Ok(())
    }

    #[test]
    fn get_perspective_transform_degenerate() {
        let src = [(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        let dst = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_eq!(
            super::get_perspective_transform(&src, &dst),
            Err(ImageError::CannotComputeDeterminant)
        );
    }

    #[test]
    fn get_perspective_transform_collinear() {
        let src = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (0.0, 1.0)];
        let dst = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert_eq!(
            super::get_perspective_transform(&src, &dst),
            Err(ImageError::CannotComputeDeterminant)
        );
    }

    #[test]
    fn get_perspective_transform_identity() -> Result<(), ImageError> {
        let points = [(3.0, 2.0), (40.0, 5.0), (38.0, 31.0), (1.0, 29.0)];
        let m = super::get_perspective_transform(&points, &points)?;

        let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for (a, b) in m.iter().zip(expected.iter()) {
            approx::assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
        Ok(())
    }
}
