/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes do not match.
    #[error("Image size mismatch: ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the resize proportion is outside of `[0, 1]`.
    #[error("Invalid proportion {0}, expected a value in [0, 1]")]
    InvalidProportion(f64),

    /// Error when an operation needs at least one pixel.
    #[error("Image is empty")]
    EmptyImage,

    /// Error when a filter kernel has an invalid length.
    #[error("Invalid kernel length {0}")]
    InvalidKernelLength(usize),

    /// Error when a histogram has an invalid number of bins.
    #[error("Invalid number of histogram bins {0}, expected a value in [1, 256]")]
    InvalidHistogramBins(usize),

    /// Error when the similarity window does not fit the image.
    #[error("Invalid window size {0} for an image of {1}x{2}, it must be odd and fit the image")]
    InvalidSsimWindow(usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),
}
