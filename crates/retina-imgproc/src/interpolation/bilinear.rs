use retina_image::Image;

use crate::padding::PaddingMode;

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `padding` - How neighbours outside of the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    padding: PaddingMode,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());

    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let iu0 = padding.map_index(u0 as isize, cols);
    let iu1 = padding.map_index(u0 as isize + 1, cols);
    let iv0 = padding.map_index(v0 as isize, rows);
    let iv1 = padding.map_index(v0 as isize + 1, rows);

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let px = |iv: usize, iu: usize| &data[(iv * cols + iu) * C..(iv * cols + iu) * C + C];

    let (p00, p01, p10, p11) = (px(iv0, iu0), px(iv0, iu1), px(iv1, iu0), px(iv1, iu1));

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use retina_image::{ImageError, ImageSize};

    #[test]
    fn bilinear_midpoints() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0.0, 1.0, 2.0, 3.0],
        )?;

        let [center] = bilinear_interpolation(&image, 0.5, 0.5, PaddingMode::Reflect);
        assert_relative_eq!(center, 1.5);

        let [top] = bilinear_interpolation(&image, 0.5, 0.0, PaddingMode::Reflect);
        assert_relative_eq!(top, 0.5);

        let [corner] = bilinear_interpolation(&image, 1.0, 1.0, PaddingMode::Reflect);
        assert_relative_eq!(corner, 3.0);

        Ok(())
    }

    #[test]
    fn bilinear_outside_reflects() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([3, 1].into(), vec![0.0, 1.0, 2.0])?;

        // -0.5 lies between the mirrored -1 (value of 1 with reflect101) and 0
        let [left] = bilinear_interpolation(&image, -0.5, 0.0, PaddingMode::Reflect101);
        assert_relative_eq!(left, 0.5);

        let [left] = bilinear_interpolation(&image, -0.5, 0.0, PaddingMode::Reflect);
        assert_relative_eq!(left, 0.0);

        Ok(())
    }
}
