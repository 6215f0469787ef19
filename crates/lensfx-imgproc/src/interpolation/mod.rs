//! Pixel interpolation methods for image transformations.
//!
//! This module provides the sampling kernels used when resampling images during geometric
//! transformations like resizing, warping, remapping or the radial distortion effect.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between the four adjacent pixels
//!
//! # Border Modes
//!
//! Neighbours that fall outside the source image are resolved with a [`BorderMode`]:
//! either a constant value (zero by default) or the closest edge pixel.

mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;
mod remap;

pub use interpolate::{interpolate_pixel, BorderMode, InterpolationMode};
pub use remap::remap;
