use std::path::PathBuf;

/// Errors raised while reading or writing image files.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// The path to read from does not exist.
    #[error("No such image file: {0}")]
    FileDoesNotExist(PathBuf),

    /// The extension of the path to write does not name a known format.
    #[error("Cannot infer an image format from the extension of {0}")]
    InvalidFileExtension(PathBuf),

    /// The file could not be opened, read or written.
    #[error(transparent)]
    FileError(#[from] std::io::Error),

    /// The decoded pixels do not fit the image container.
    #[error("Invalid decoded image. {0}")]
    ImageCreationError(#[from] retina_image::ImageError),

    /// The file content is not a decodable image.
    #[error("Cannot decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The encoder rejected the image, e.g. alpha in a format without it.
    #[error("Cannot encode the image. {0}")]
    ImageEncodeError(image::ImageError),

    /// The number of channels has no matching pixel layout.
    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    /// Writing an image without pixels.
    #[error("Cannot write an empty image")]
    EmptyImage,
}
