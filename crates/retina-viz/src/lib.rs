#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the viz module.
pub mod error;

/// RGB canvas holding a rendered figure.
pub mod figure;

/// Functions rendering images and histograms into figures.
pub mod plot;

pub use crate::error::VizError;
pub use crate::figure::{Figure, PlotStyle};
pub use crate::plot::{plot_histogram, plot_image, plot_result, ToPanel};

#[cfg(feature = "rerun")]
#[doc(no_inline)]
pub use rerun;
