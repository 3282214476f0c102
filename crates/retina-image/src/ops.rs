use crate::{Image, ImageDtype};

/// Convert an image to normalized `f32` intensities.
///
/// `u8` images are scaled to `[0, 1]`, `f32` images are copied as they are.
pub fn to_norm_f32<T: ImageDtype, const C: usize>(src: &Image<T, C>) -> Image<f32, C> {
    src.map(ImageDtype::to_norm_f32)
}

/// Convert normalized `f32` intensities back to the given pixel type.
///
/// ```
/// use retina_image::{ops, Image};
///
/// let image = Image::<f32, 1>::new([3, 1].into(), vec![-0.5, 0.5, 2.0]).unwrap();
/// let image_u8: Image<u8, 1> = ops::from_norm_f32(&image);
///
/// assert_eq!(image_u8.as_slice(), &[0, 128, 255]);
/// ```
pub fn from_norm_f32<T: ImageDtype, const C: usize>(src: &Image<f32, C>) -> Image<T, C> {
    src.map(T::from_norm_f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{image::ImageSize, ImageError};

    #[test]
    fn test_norm_roundtrip() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                height: 1,
                width: 3,
            },
            vec![0u8, 128, 255],
        )?;

        let norm = to_norm_f32(&image);
        assert_eq!(norm.as_slice()[0], 0.0);
        assert_eq!(norm.as_slice()[2], 1.0);

        let back: Image<u8, 1> = from_norm_f32(&norm);
        assert_eq!(back, image);

        Ok(())
    }
}
