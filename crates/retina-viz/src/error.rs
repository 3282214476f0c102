/// An error type for the viz module.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Error when building or processing the rendered images.
    #[error(transparent)]
    ImageError(#[from] retina_image::ImageError),

    /// Error when writing a figure to disk.
    #[error(transparent)]
    IoError(#[from] retina_io::IoError),

    /// Error when a figure has nothing to show.
    #[error("Cannot build a figure without images")]
    EmptyFigure,

    /// The number of channels cannot be displayed.
    #[error("Cannot display an image with {0} channels")]
    UnsupportedChannels(usize),

    /// Error when logging to a rerun recording stream.
    #[cfg(feature = "rerun")]
    #[error(transparent)]
    RerunError(#[from] rerun::RecordingStreamError),
}
