#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// compute and match image histograms module.
pub mod histogram;

/// utilities for interpolation.
pub mod interpolation;

/// image processing metrics module.
pub mod metrics;

/// operations to normalize images.
pub mod normalize;

/// border handling for out of range pixel accesses.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// utility functions for resizing images.
pub mod resize;
