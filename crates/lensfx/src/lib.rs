#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lensfx_image as image;

#[doc(inline)]
pub use lensfx_imgproc as imgproc;

#[doc(inline)]
pub use lensfx_io as io;
