use crate::parallel;
use retina_image::{Image, ImageDtype, ImageError};

/// RGB weights of the grayscale conversion (ITU-R BT.709 luma).
const RW: f32 = 0.2125;
const GW: f32 = 0.7154;
const BW: f32 = 0.0721;

/// Convert an image with any channel layout to a normalized `f32` grayscale image.
///
/// Color images are converted with `Y = 0.2125 * R + 0.7154 * G + 0.0721 * B`.
/// Values are first mapped to normalized intensities (see [`ImageDtype::to_norm_f32`]).
/// Single channel images are taken as they are, two channel images are read as
/// luma plus alpha, and images with three or more channels are converted from
/// their first three (RGB) channels. Alpha is ignored.
///
/// # Arguments
///
/// * `src` - The input image.
///
/// # Returns
///
/// A single channel image with the same size as the input.
pub fn gray_normalized<T, const C: usize>(src: &Image<T, C>) -> Result<Image<f32, 1>, ImageError>
where
    T: ImageDtype,
{
    let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;

    parallel::par_iter_rows(src, &mut dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = match C {
            1 | 2 => src_pixel[0].to_norm_f32(),
            _ => {
                RW * src_pixel[0].to_norm_f32()
                    + GW * src_pixel[1].to_norm_f32()
                    + BW * src_pixel[2].to_norm_f32()
            }
        };
    });

    Ok(dst)
}

/// Expand a single channel image to RGB by copying the value into the three channels.
///
/// # Errors
///
/// Returns an error if `src` and `dst` differ in size.
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}
