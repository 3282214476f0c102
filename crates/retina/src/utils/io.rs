use std::path::Path;

use retina_image::{ops, Image, ImageDtype};
use retina_io::{functional, IoError};

pub use retina_io::functional::{read_image, read_image_any_mono8, read_image_any_rgb8};
pub use retina_io::GenericImage;

/// Write an image to disk in the format implied by the file extension.
///
/// Pixel values are read as normalized intensities and stored with 8 bits,
/// so `f32` images are expected in `[0, 1]` and clipped otherwise.
///
/// # Arguments
///
/// * `image` - The image to write with 1 to 4 channels.
/// * `file_path` - The destination path.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the image is empty, the
/// encoder rejects the channel layout or the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use retina::image::Image;
/// use retina::utils::io::save_image;
///
/// let image = Image::<f32, 1>::from_size_val([8, 8].into(), 0.5).unwrap();
/// save_image(&image, "difference.png").unwrap();
/// ```
pub fn save_image<T, const C: usize>(
    image: &Image<T, C>,
    file_path: impl AsRef<Path>,
) -> Result<(), IoError>
where
    T: ImageDtype,
{
    let image_u8 = ops::from_norm_f32::<u8, C>(&ops::to_norm_f32(image));
    functional::write_image(file_path, &image_u8)
}
