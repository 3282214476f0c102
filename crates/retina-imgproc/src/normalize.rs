use num_traits::Float;
use retina_image::{Image, ImageError};

use crate::parallel;

/// Smallest and largest value over all the channels of an image.
///
/// # Errors
///
/// Returns [`ImageError::EmptyImage`] if the image has no pixels.
///
/// # Example
///
/// ```
/// use retina_image::Image;
/// use retina_imgproc::normalize::find_min_max;
///
/// let image = Image::<u8, 2>::new([3, 1].into(), vec![9, 4, 200, 17, 4, 31]).unwrap();
/// assert_eq!(find_min_max(&image).unwrap(), (4, 200));
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let (&first, rest) = image
        .as_slice()
        .split_first()
        .ok_or(ImageError::EmptyImage)?;

    Ok(rest.iter().fold((first, first), |(lo, hi), &v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    }))
}

/// Linearly rescale an image so that its values span `[min, max]`.
///
/// `dst = (src - src_min) * (max - min) / (src_max - src_min) + min`, with the
/// extremes taken over all channels of `src`. A constant image maps to `min`.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, with the size of `src`.
/// * `min` - The lower bound of the output range.
/// * `max` - The upper bound of the output range.
///
/// # Errors
///
/// Returns an error if the images differ in size or `src` is empty.
///
/// # Example
///
/// ```
/// use retina_image::Image;
/// use retina_imgproc::normalize::normalize_min_max;
///
/// let image = Image::<f32, 1>::new([3, 1].into(), vec![-1.0, 0.0, 3.0]).unwrap();
/// let mut scaled = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// normalize_min_max(&image, &mut scaled, 0.0, 1.0).unwrap();
/// assert_eq!(scaled.as_slice(), &[0.0, 0.25, 1.0]);
/// ```
pub fn normalize_min_max<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    min: T,
    max: T,
) -> Result<(), ImageError>
where
    T: Send + Sync + Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (src_min, src_max) = find_min_max(src)?;
    let range = src_max - src_min;

    if range == T::zero() {
        dst.as_slice_mut().iter_mut().for_each(|v| *v = min);
        return Ok(());
    }

    let span = max - min;
    parallel::par_iter_rows_val(src, dst, |&v, out| {
        *out = (v - src_min) * span / range + min;
    });

    Ok(())
}
