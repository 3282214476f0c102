use rayon::prelude::*;
use retina_image::{Image, ImageDtype, ImageError, ImageSize};

use crate::{
    filter,
    interpolation::{interpolate_pixel, InterpolationMode},
    normalize::find_min_max,
    padding::PaddingMode,
};

/// Compute the size of an image scaled by a proportion.
///
/// Each dimension is rounded to the nearest integer, ties to even.
///
/// # Arguments
///
/// * `size` - The size to scale.
/// * `proportion` - The scale factor, finite and in `[0, 1]`.
///
/// # Errors
///
/// Returns an error if the proportion is not finite or outside of `[0, 1]`.
///
/// # Example
///
/// ```
/// use retina_image::ImageSize;
/// use retina_imgproc::resize::proportional_size;
///
/// let size = proportional_size([100, 200].into(), 0.5).unwrap();
/// assert_eq!(size, ImageSize { width: 50, height: 100 });
/// ```
pub fn proportional_size(size: ImageSize, proportion: f64) -> Result<ImageSize, ImageError> {
    if !proportion.is_finite() || !(0.0..=1.0).contains(&proportion) {
        return Err(ImageError::InvalidProportion(proportion));
    }

    let scale = |len: usize| (len as f64 * proportion).round_ties_even() as usize;

    Ok(ImageSize {
        width: scale(size.width),
        height: scale(size.height),
    })
}

/// Anti-aliasing sigma for a downscale from `src_len` to `dst_len` samples.
fn antialias_sigma(src_len: usize, dst_len: usize) -> f32 {
    ((src_len as f32 / dst_len as f32 - 1.0) / 2.0).max(0.0)
}

/// Resize an image to a new size.
///
/// When shrinking, the image is first smoothed with a gaussian filter of
/// sigma `(in / out - 1) / 2` per axis. Every output pixel is then sampled
/// at `(dst + 0.5) * in / out - 0.5` of the smoothed input, mirroring the
/// image at the borders, and clamped to the value range of the input.
///
/// It supports any number of channels and data types.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, its size defines the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if `src` is empty while `dst` is not.
///
/// # Example
///
/// ```
/// use retina_image::{Image, ImageSize};
/// use retina_imgproc::resize::resize_native;
/// use retina_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize_native(&image, &mut image_resized, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize_native<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if dst.is_empty() {
        return Ok(());
    }

    if src.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let src_f32 = src.map(Into::<f32>::into);
    let (min_val, max_val) = find_min_max(&src_f32)?;

    let sigma = (
        antialias_sigma(src.width(), dst.width()),
        antialias_sigma(src.height(), dst.height()),
    );

    let smoothed = if sigma.0 > 0.0 || sigma.1 > 0.0 {
        log::debug!(
            "anti-aliasing {} before resize with sigma {:?}",
            src.size(),
            sigma
        );
        let mut smoothed = Image::<f32, C>::from_size_val(src.size(), 0.0)?;
        filter::gaussian_blur(&src_f32, &mut smoothed, sigma, PaddingMode::Reflect101)?;
        smoothed
    } else {
        src_f32
    };

    let scale_x = src.width() as f32 / dst.width() as f32;
    let scale_y = src.height() as f32 / dst.height() as f32;
    let dst_cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let v = (y as f32 + 0.5) * scale_y - 0.5;
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, dst_pixel)| {
                    let u = (x as f32 + 0.5) * scale_x - 0.5;
                    let pixel = interpolate_pixel(
                        &smoothed,
                        u,
                        v,
                        interpolation,
                        PaddingMode::Reflect101,
                    );
                    dst_pixel
                        .iter_mut()
                        .zip(pixel.iter())
                        .for_each(|(d, &p)| *d = T::from_f32(p.clamp(min_val, max_val)));
                });
        });

    Ok(())
}
