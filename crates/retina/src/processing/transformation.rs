use retina_image::{Image, ImageDtype, ImageError};
use retina_imgproc::{
    interpolation::InterpolationMode,
    resize::{proportional_size, resize_native},
};

/// Scale an image down by a proportion of its size.
///
/// The target height and width are `round(height * proportion)` and
/// `round(width * proportion)`, rounding half to even. A proportion of `1`
/// returns a copy of the image and a zero target dimension yields an empty
/// image of that size. Otherwise the image is anti-aliased and resampled with
/// bilinear interpolation.
///
/// # Arguments
///
/// * `image` - The image to resize with shape (H, W, C).
/// * `proportion` - The scale factor in `[0, 1]`.
///
/// # Errors
///
/// Returns an error if `proportion` is not finite or outside of `[0, 1]`.
///
/// # Example
///
/// ```
/// use retina::image::{Image, ImageSize};
/// use retina::processing::resize_image;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 100,
///         height: 200,
///     },
///     0,
/// )
/// .unwrap();
///
/// let resized = resize_image(&image, 0.5).unwrap();
/// assert_eq!(resized.height(), 100);
/// assert_eq!(resized.width(), 50);
/// ```
pub fn resize_image<T, const C: usize>(
    image: &Image<T, C>,
    proportion: f64,
) -> Result<Image<T, C>, ImageError>
where
    T: ImageDtype,
{
    let new_size = proportional_size(image.size(), proportion)?;

    if new_size == image.size() {
        return Ok(image.clone());
    }

    log::debug!("resizing {} to {}", image.size(), new_size);

    let mut resized = Image::<T, C>::from_size_val(new_size, T::default())?;
    resize_native(image, &mut resized, InterpolationMode::Bilinear)?;

    Ok(resized)
}
