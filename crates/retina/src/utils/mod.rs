/// Read and write images from disk.
pub mod io;

/// Render images and histograms into figures.
pub mod plot;
