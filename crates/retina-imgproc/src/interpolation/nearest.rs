use retina_image::Image;

use crate::padding::PaddingMode;

/// Values of the pixel closest to `(u, v)`.
pub(crate) fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    padding: PaddingMode,
) -> [f32; C] {
    let cols = image.cols();
    let iu = padding.map_index(u.round() as isize, cols);
    let iv = padding.map_index(v.round() as isize, image.rows());

    let start = (iv * cols + iu) * C;
    let mut pixel = [0.0; C];
    pixel.copy_from_slice(&image.as_slice()[start..start + C]);

    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use retina_image::ImageError;

    #[test]
    fn nearest_rounds_to_closest() -> Result<(), ImageError> {
        let data = (0..8).map(|i| i as f32).collect();
        let image = Image::<f32, 2>::new([2, 2].into(), data)?;

        let pixel = nearest_neighbor_interpolation(&image, 0.4, 0.6, PaddingMode::Reflect);
        assert_eq!(pixel, [4.0, 5.0]);

        // column 2 folds to 0 and row -1 to 1
        let pixel = nearest_neighbor_interpolation(&image, 2.2, -0.9, PaddingMode::Reflect101);
        assert_eq!(pixel, [4.0, 5.0]);

        Ok(())
    }
}
