#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use retina_image as image;

#[doc(inline)]
pub use retina_imgproc as imgproc;

#[doc(inline)]
pub use retina_io as io;

#[doc(inline)]
pub use retina_viz as viz;

/// High level image comparison and transformation operations.
pub mod processing;

/// Reading, writing and plotting helpers.
pub mod utils;
