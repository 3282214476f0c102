use retina_image::{Image, ImageError};

use super::{kernels, separable_filter};
use crate::padding::PaddingMode;

/// Gaussian kernels are truncated at this many standard deviations.
const GAUSSIAN_TRUNCATE: f32 = 4.0;

/// Average every pixel over a `kernel_size.0` x `kernel_size.1` window.
///
/// Both window sides must be odd, pixels outside of the image are read
/// through `padding`. `src` and `dst` must have the same size.
pub fn box_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
    padding: PaddingMode,
) -> Result<(), ImageError> {
    let kernel_x = kernels::box_blur_kernel_1d(kernel_size.0);
    let kernel_y = kernels::box_blur_kernel_1d(kernel_size.1);
    separable_filter(src, dst, &kernel_x, &kernel_y, padding)
}

/// Smooth an image with a separable gaussian of standard deviation
/// `(sigma_x, sigma_y)`.
///
/// The kernel radius on each axis is `round(4 * sigma)` and a non positive
/// sigma leaves that axis untouched. `src` and `dst` must have the same size.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    sigma: (f32, f32),
    padding: PaddingMode,
) -> Result<(), ImageError> {
    let kernel = |sigma: f32| -> Vec<f32> {
        if sigma <= 0.0 {
            return vec![1.0];
        }
        let radius = kernels::gaussian_kernel_radius(sigma, GAUSSIAN_TRUNCATE);
        kernels::gaussian_kernel_1d(2 * radius + 1, sigma)
    };

    let kernel_x = kernel(sigma.0);
    let kernel_y = kernel(sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y, padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use retina_image::ImageSize;

    #[test]
    fn test_box_blur() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Image::new(
            size,
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 9.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;

        box_blur(&img, &mut dst, (3, 3), PaddingMode::Reflect)?;

        assert_relative_eq!(dst.as_slice()[6], 1.0, epsilon = 1e-6);
        assert_relative_eq!(dst.as_slice()[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(dst.as_slice().iter().sum::<f32>(), 9.0, epsilon = 1e-5);

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_zero_sigma_is_identity() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::new([3, 2].into(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(img.size(), 0.0)?;

        gaussian_blur(&img, &mut dst, (0.0, 0.0), PaddingMode::Reflect101)?;
        assert_eq!(dst.as_slice(), img.as_slice());

        Ok(())
    }

    #[test]
    fn test_gaussian_blur_preserves_mean() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 9,
            height: 9,
        };
        let mut img = Image::<f32, 1>::from_size_val(size, 0.0)?;
        img.as_slice_mut()[4 * 9 + 4] = 1.0;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        gaussian_blur(&img, &mut dst, (1.0, 1.0), PaddingMode::Reflect)?;

        let center = dst.as_slice()[4 * 9 + 4];
        assert!(center < 1.0 && center > dst.as_slice()[4 * 9 + 5]);
        assert_relative_eq!(dst.as_slice().iter().sum::<f32>(), 1.0, epsilon = 1e-4);

        Ok(())
    }
}
