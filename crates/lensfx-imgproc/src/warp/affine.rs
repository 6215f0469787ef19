use std::f32::consts::PI;

use faer::prelude::SpSolver;
use lensfx_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, remap, BorderMode, InterpolationMode};

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix. A singular matrix yields all zeros in its
/// linear part.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::warp::get_rotation_matrix2d;
///
/// let rotation_matrix = get_rotation_matrix2d((0.0, 0.0), 90.0, 1.0);
/// assert!((rotation_matrix[1] - 1.0).abs() < 1e-6);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Computes the affine transformation that maps three source points onto three destination
/// points.
///
/// # Arguments
///
/// * `src` - The points in the source image.
/// * `dst` - The corresponding points in the destination image.
///
/// # Returns
///
/// The 2x3 affine matrix `m` with `dst[i] = m * [src[i], 1]`.
///
/// # Errors
///
/// Returns [`ImageError::CannotComputeDeterminant`] if the source points are collinear.
///
/// # Example
///
/// ```
/// use lensfx_imgproc::warp::get_affine_transform;
///
/// let src = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
/// let dst = [(5.0, 5.0), (6.0, 5.0), (5.0, 6.0)];
///
/// let m = get_affine_transform(&src, &dst).unwrap();
/// let expected = [1.0, 0.0, 5.0, 0.0, 1.0, 5.0];
/// assert!(m.iter().zip(expected.iter()).all(|(a, b)| (a - b).abs() < 1e-5));
/// ```
pub fn get_affine_transform(
    src: &[(f32, f32); 3],
    dst: &[(f32, f32); 3],
) -> Result<[f32; 6], ImageError> {
    // collinear source points leave the system without a unique solution
    let mat_src = faer::Mat::<f64>::from_fn(3, 3, |i, j| match j {
        0 => src[i].0 as f64,
        1 => src[i].1 as f64,
        _ => 1.0,
    });
    if mat_src.determinant().abs() < f64::EPSILON {
        return Err(ImageError::CannotComputeDeterminant);
    }

    // construct matrix A and vector b with A * m = b
    let mut mat_a = faer::Mat::<f64>::zeros(6, 6);
    let mut mat_b = faer::Mat::<f64>::zeros(6, 1);
    for (i, (&(x, y), &(u, v))) in src.iter().zip(dst.iter()).enumerate() {
        let (x, y, u, v) = (x as f64, y as f64, u as f64, v as f64);

        mat_a.write(2 * i, 0, x);
        mat_a.write(2 * i, 1, y);
        mat_a.write(2 * i, 2, 1.0);
        mat_a.write(2 * i + 1, 3, x);
        mat_a.write(2 * i + 1, 4, y);
        mat_a.write(2 * i + 1, 5, 1.0);
        mat_b.write(2 * i, 0, u);
        mat_b.write(2 * i + 1, 0, v);
    }

    let params = mat_a.partial_piv_lu().solve(mat_b);
    let aff = params.col(0);

    Ok([
        aff[0] as f32,
        aff[1] as f32,
        aff[2] as f32,
        aff[3] as f32,
        aff[4] as f32,
        aff[5] as f32,
    ])
}

/// Applies an affine transformation to a point.
fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Destination pixels whose preimage falls outside of the source are set to zero.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 2x3 affine transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::interpolation::InterpolationMode;
/// use lensfx_imgproc::warp::warp_affine;
///
/// let src = Image::<_, 3>::from_size_val(
///    ImageSize {
///       width: 4,
///       height: 5,
///    },
///    1f32,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<_, 3>::from_size_val(src.size(), 0.0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    let (dst_rows, dst_cols) = (dst.rows(), dst.cols());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        Ok(transform_point(x as f32, y as f32, &m_inv))
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
    fn warp_affine_smoke_ch3() -> Result<(), ImageError> {
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

        let mut image_transformed = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(image_transformed.num_channels(), 3);
        assert_eq!(image_transformed.size().width, 2);
        assert_eq!(image_transformed.size().height, 3);

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_identity() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            (0..20).map(|x| x as f32).collect(),
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            InterpolationMode::Nearest,
        )?;

        assert_eq!(image_transformed.as_slice(), image.as_slice());
        assert_eq!(image_transformed.size(), image.size());

        Ok(())
    }

    #[test]
    fn warp_affine_correctness_rot90() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0f32, 1.0f32, 2.0f32, 3.0f32],
        )?;

        let mut image_transformed = Image::<_, 1>::from_size_val(image.size(), 0.0)?;

        super::warp_affine(
            &image,
            &mut image_transformed,
            &super::get_rotation_matrix2d((0.5, 0.5), 90.0, 1.0),
            InterpolationMode::Nearest,
        )?;

        assert_eq!(
            image_transformed.as_slice(),
            &[1.0f32, 3.0f32, 0.0f32, 2.0f32]
        );

        Ok(())
    }

    #[test]
    fn warp_affine_translation_u8() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([3, 2].into(), vec![1, 2, 3, 4, 5, 6])?;
        let mut shifted = Image::<u8, 1>::from_size_val(image.size(), 9)?;

        super::warp_affine(
            &image,
            &mut shifted,
            &[1.0, 0.0, 1.0, 0.0, 1.0, 1.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(shifted.as_slice(), &[0, 0, 0, 0, 1, 2]);

        Ok(())
    }

    #[test]
    fn warp_affine_reflect_x() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([2, 3].into(), vec![1, 2, 3, 4, 5, 6])?;
        let mut reflected = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        let rows = image.rows() as f32;
        super::warp_affine(
            &image,
            &mut reflected,
            &[1.0, 0.0, 0.0, 0.0, -1.0, rows - 1.0],
            InterpolationMode::Bilinear,
        )?;

        assert_eq!(reflected.as_slice(), &[5, 6, 3, 4, 1, 2]);

        Ok(())
    }

    #[test]
    fn invert_affine_roundtrip() {
        let m = [2.0, 0.5, 3.0, -1.0, 1.5, 4.0];
        let inv = super::invert_affine_transform(&m);
        let (x, y) = super::transform_point(7.0, -2.0, &m);
        let (u, v) = super::transform_point(x, y, &inv);
        approx::assert_relative_eq!(u, 7.0, epsilon = 1e-4);
        approx::assert_relative_eq!(v, -2.0, epsilon = 1e-4);
    }

    #[test]
    fn get_affine_transform_recovers_matrix() -> Result<(), ImageError> {
        let m = [2.0, 0.5, 3.0, -1.0, 1.5, 4.0];
        let src = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        let dst = src.map(|(x, y)| super::transform_point(x, y, &m));

        let estimated = super::get_affine_transform(&src, &dst)?;
        for (a, b) in estimated.iter().zip(m.iter()) {
            approx::assert_relative_eq!(a, b, epsilon = 1e-4);
        }

        Ok(())
    }

    #[test]
    fn get_affine_transform_collinear() {
        let src = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        let dst = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        assert_eq!(
            super::get_affine_transform(&src, &dst),
            Err(ImageError::CannotComputeDeterminant)
        );
    }

    #[test]
    fn get_affine_transform_repeated_point() {
        let src = [(4.0, 4.0), (4.0, 4.0), (0.0, 1.0)];
        let dst = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        assert_eq!(
            super::get_affine_transform(&src, &dst),
            Err(ImageError::CannotComputeDeterminant)
        );
    }
}
