//! Radial lens distortion.
//!
//! Pixel positions are perturbed as a function of their distance to the image center with the
//! odd polynomial `r' = r + k3 * r^3 + k5 * r^5`, where `r` is measured in coordinates
//! normalized so that the image half-width and half-height map to `1.0`. Positive coefficients
//! sample further away from the center and produce the barrel effect, negative ones a
//! pincushion.
//!
//! # Example
//!
//! ```
//! use lensfx_image::{Image, ImageSize};
//! use lensfx_imgproc::distortion::distort;
//!
//! let image = Image::<u8, 1>::from_size_val(
//!     ImageSize { width: 4, height: 4 },
//!     100,
//! ).unwrap();
//!
//! let barrel = distort(&image, 0.1, 0.12).unwrap();
//! assert_eq!(barrel.size(), image.size());
//! ```

use lensfx_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::interpolation::{
    grid::meshgrid_from_fn, interpolate_pixel, BorderMode, InterpolationMode,
};
use crate::parallel;

/// Coefficients of the radial distortion polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialDistortion {
    /// The cubic radial coefficient
    pub k3: f64,
    /// The quintic radial coefficient
    pub k5: f64,
}

impl RadialDistortion {
    /// Create the distortion parameters from the cubic and quintic coefficients.
    pub fn new(k3: f64, k5: f64) -> Self {
        Self { k3, k5 }
    }

    /// Apply the distortion polynomial to a normalized radius.
    ///
    /// `r = 0` is a fixed point for any coefficients.
    pub fn distort_radius(&self, r: f64) -> f64 {
        let r3 = r * r * r;
        let r5 = r3 * r * r;
        r + self.k3 * r3 + self.k5 * r5
    }
}

/// Compute the source coordinates sampled by the output pixel `(x, y)`.
///
/// # Arguments
///
/// * `x` - The x coordinate of the output pixel.
/// * `y` - The y coordinate of the output pixel.
/// * `size` - The size of the image.
/// * `params` - The distortion coefficients.
///
/// # Returns
///
/// The `(u, v)` coordinates in the source image, possibly outside of it.
///
/// # Example
///
/// ```
/// use lensfx_image::ImageSize;
/// use lensfx_imgproc::distortion::{distort_point_radial, RadialDistortion};
///
/// let size = ImageSize { width: 4, height: 4 };
/// let params = RadialDistortion::new(0.1, 0.12);
///
/// // the center is a fixed point
/// assert_eq!(distort_point_radial(2.0, 2.0, &size, &params), (2.0, 2.0));
/// ```
pub fn distort_point_radial(
    x: f64,
    y: f64,
    size: &ImageSize,
    params: &RadialDistortion,
) -> (f64, f64) {
    let xmid = size.width as f64 / 2.0;
    let ymid = size.height as f64 / 2.0;

    // centered and normalized coordinates
    let nx = (x - xmid) / xmid;
    let ny = (y - ymid) / ymid;

    // polar form
    let r = nx.hypot(ny);
    let theta = ny.atan2(nx);

    let rd = params.distort_radius(r);

    // back to cartesian and pixel units
    let u = rd * theta.cos();
    let v = rd * theta.sin();

    (u * xmid + xmid, v * ymid + ymid)
}

/// Generate the dense coordinate field of the radial distortion.
///
/// The maps can be fed to [`crate::interpolation::remap`] to resample any image of the
/// given size.
///
/// # Arguments
///
/// * `params` - The distortion coefficients.
/// * `size` - The size of the image.
///
/// # Returns
///
/// * `map_x` - The x coordinates to sample for every output pixel.
/// * `map_y` - The y coordinates to sample for every output pixel.
pub fn generate_radial_distortion_map(
    params: &RadialDistortion,
    size: &ImageSize,
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    meshgrid_from_fn(size.width, size.height, |x, y| {
        let (u, v) = distort_point_radial(x as f64, y as f64, size, params);
        Ok((u as f32, v as f32))
    })
}

/// Apply the radial distortion to an image with explicit sampling policies.
///
/// The sample coordinates are computed per pixel without materializing the coordinate field.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `params` - The distortion coefficients.
/// * `interpolation` - The interpolation mode used to sample the source.
/// * `border` - The policy for samples outside the source.
///
/// # Returns
///
/// A new image with the same size and channels as the input.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if the source image is empty.
pub fn distort_with_border<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    params: &RadialDistortion,
    interpolation: InterpolationMode,
    border: BorderMode,
) -> Result<Image<T, C>, ImageError> {
    if src.is_empty() {
        return Err(ImageError::InvalidInput(format!(
            "cannot distort an empty image of size {}x{}",
            src.width(),
            src.height()
        )));
    }

    let size = src.size();
    let mut dst = Image::from_size_val(size, T::default())?;

    parallel::par_iter_rows_indexed(&mut dst, |x, y, dst_pixel| {
        let (u, v) = distort_point_radial(x as f64, y as f64, &size, params);
        let pixel = interpolate_pixel(src, u as f32, v as f32, interpolation, border);
        dst_pixel
            .iter_mut()
            .zip(pixel.iter())
            .for_each(|(d, &p)| *d = T::from_f32(p));
    });

    Ok(dst)
}

/// Apply the barrel (or pincushion) distortion effect to an image.
///
/// The source is sampled with bilinear interpolation and samples falling outside of it are
/// filled with zero.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `k3` - The cubic radial coefficient.
/// * `k5` - The quintic radial coefficient.
///
/// # Errors
///
/// Returns [`ImageError::InvalidInput`] if the source image is empty.
pub fn distort<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    k3: f64,
    k5: f64,
) -> Result<Image<T, C>, ImageError> {
    distort_with_border(
        src,
        &RadialDistortion::new(k3, k5),
        InterpolationMode::Bilinear,
        BorderMode::Constant(0.0),
    )
}
