use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};
use retina_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image in the native 8-bit layout of the file.
#[derive(Clone, Debug, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    Mono8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    MonoAlpha8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::Mono8(img) => img.size(),
            GenericImage::MonoAlpha8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
        }
    }

    /// The number of channels of the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::Mono8(_) => 1,
            GenericImage::MonoAlpha8(_) => 2,
            GenericImage::Rgb8(_) => 3,
            GenericImage::Rgba8(_) => 4,
        }
    }
}

fn decode_image(file_path: &Path) -> Result<DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    log::debug!("decoding image from {}", file_path.display());

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    Ok(img)
}

fn image_size(img: &DynamicImage) -> ImageSize {
    ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate,
/// guessing the format from the file content.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
/// * `is_gray` - Convert the image to a single luma channel.
///
/// # Returns
///
/// The image in its native layout: grayscale files yield [`GenericImage::Mono8`],
/// grayscale files with alpha [`GenericImage::MonoAlpha8`], color files with
/// alpha [`GenericImage::Rgba8`] and anything else [`GenericImage::Rgb8`].
/// Higher bit depths are reduced to 8 bits.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be decoded.
pub fn read_image(file_path: impl AsRef<Path>, is_gray: bool) -> Result<GenericImage, IoError> {
    let img = decode_image(file_path.as_ref())?;
    let size = image_size(&img);
    let color = img.color();

    let image = if is_gray || color == ColorType::L8 || color == ColorType::L16 {
        GenericImage::Mono8(Image::new(size, img.into_luma8().into_raw())?)
    } else if color == ColorType::La8 || color == ColorType::La16 {
        GenericImage::MonoAlpha8(Image::new(size, img.into_luma_alpha8().into_raw())?)
    } else if color.has_alpha() {
        GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
    } else {
        GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?)
    };

    Ok(image)
}

/// Reads any image file and converts it to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode_image(file_path.as_ref())?;
    let size = image_size(&img);
    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Reads any image file and converts it to 8-bit grayscale.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = decode_image(file_path.as_ref())?;
    let size = image_size(&img);
    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

/// Writes an 8-bit image to the given file path.
///
/// The encoder is selected from the file extension. One, two, three and four
/// channel images are written as luma, luma with alpha, RGB and RGBA.
///
/// # Arguments
///
/// * `file_path` - The destination path, its extension selects the format.
/// * `image` - The image to write.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the image is empty, the
/// encoder rejects the layout or the file cannot be written.
pub fn write_image<const C: usize>(
    file_path: impl AsRef<Path>,
    image: &Image<u8, C>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    if image.is_empty() {
        return Err(IoError::EmptyImage);
    }

    let color = match C {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        _ => return Err(IoError::UnsupportedChannels(C)),
    };

    log::debug!("encoding {} image as {format:?} to {}", image.size(), file_path.display());

    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        color,
        format,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(e) => IoError::FileError(e),
        e => IoError::ImageEncodeError(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use retina_image::ImageSize;

    fn gradient_rgb(size: ImageSize) -> Result<Image<u8, 3>, IoError> {
        let data = (0..size.area() * 3).map(|i| (i % 251) as u8).collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn read_write_png_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let image = gradient_rgb(ImageSize {
            width: 13,
            height: 7,
        })?;
        write_image(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image(&file_path, false)?;
        assert_eq!(image_back, GenericImage::Rgb8(image.clone()));
        assert_eq!(image_back.num_channels(), 3);

        assert_eq!(read_image_any_rgb8(&file_path)?, image);

        Ok(())
    }

    #[test]
    fn read_write_png_mono_and_rgba() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let size = ImageSize {
            width: 4,
            height: 3,
        };

        let mono = Image::<u8, 1>::new(size, (0..12).map(|i| i * 20).collect())?;
        let mono_path = tmp_dir.path().join("mono.png");
        write_image(&mono_path, &mono)?;
        assert_eq!(read_image(&mono_path, false)?, GenericImage::Mono8(mono));

        let mono_alpha = Image::<u8, 2>::new(size, (0..24).map(|i| i * 10).collect())?;
        let mono_alpha_path = tmp_dir.path().join("mono_alpha.png");
        write_image(&mono_alpha_path, &mono_alpha)?;
        let back = read_image(&mono_alpha_path, false)?;
        assert_eq!(back.num_channels(), 2);
        assert_eq!(back, GenericImage::MonoAlpha8(mono_alpha));

        let rgba = Image::<u8, 4>::from_size_val(size, 128)?;
        let rgba_path = tmp_dir.path().join("rgba.png");
        write_image(&rgba_path, &rgba)?;
        assert_eq!(read_image(&rgba_path, false)?, GenericImage::Rgba8(rgba));

        Ok(())
    }

    #[test]
    fn read_gray_from_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("white.png");

        let image = Image::<u8, 3>::from_size_val([5, 2].into(), 255)?;
        write_image(&file_path, &image)?;

        let gray = read_image(&file_path, true)?;
        assert_eq!(gray.num_channels(), 1);
        assert_eq!(gray.size(), image.size());
        assert_eq!(read_image_any_mono8(&file_path)?.as_slice(), &[255; 10]);

        Ok(())
    }

    #[test]
    fn read_errors() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;

        let missing = tmp_dir.path().join("missing.png");
        assert!(matches!(
            read_image(&missing, false),
            Err(IoError::FileDoesNotExist(_))
        ));

        let garbage = tmp_dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not a png")?;
        assert!(matches!(
            read_image(&garbage, false),
            Err(IoError::ImageDecodeError(_))
        ));

        Ok(())
    }

    #[test]
    fn write_errors() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;

        assert!(matches!(
            write_image(tmp_dir.path().join("image.unknown"), &image),
            Err(IoError::InvalidFileExtension(_))
        ));

        let empty = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        assert!(matches!(
            write_image(tmp_dir.path().join("empty.png"), &empty),
            Err(IoError::EmptyImage)
        ));

        let rgba = Image::<u8, 4>::from_size_val([2, 2].into(), 0)?;
        assert!(matches!(
            write_image(tmp_dir.path().join("alpha.jpg"), &rgba),
            Err(IoError::ImageEncodeError(_))
        ));

        let unwritable = tmp_dir.path().join("no_such_dir").join("image.png");
        assert!(matches!(
            write_image(&unwritable, &image),
            Err(IoError::FileError(_))
        ));

        Ok(())
    }
}
