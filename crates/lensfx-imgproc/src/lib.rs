#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image cropping module.
pub mod crop;

/// radial lens distortion module.
pub mod distortion;

/// compute and equalize image histograms.
pub mod histogram;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// intensity projections and bar plots.
pub mod projection;

/// utility functions for resizing images.
pub mod resize;

/// template based image stitching.
pub mod stitch;

/// template matching module.
pub mod template;

/// image geometric transformations module.
pub mod warp;
