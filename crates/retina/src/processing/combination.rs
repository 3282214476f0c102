use retina_image::{Image, ImageDtype, ImageError};
use retina_imgproc::{
    color::gray_normalized,
    histogram::{match_histograms, HistogramValues},
    metrics::{structural_similarity, SsimConfig},
    normalize::normalize_min_max,
};

/// Locate the regions where two images differ.
///
/// Both images are converted to normalized grayscale and compared with the
/// structural similarity index. The similarity score is logged and the
/// similarity map is returned min-max normalized to `[0, 1]`, low values
/// marking the regions that differ the most. Comparing an image with itself
/// yields an all zero map.
///
/// # Arguments
///
/// * `image1` - The first image with shape (H, W, C).
/// * `image2` - The second image with the same shape.
///
/// # Errors
///
/// Returns an error if the images differ in size or are smaller than the
/// 7x7 similarity window.
///
/// # Example
///
/// ```
/// use retina::image::Image;
/// use retina::processing::find_difference;
///
/// let image = Image::<u8, 3>::from_size_val([16, 16].into(), 30).unwrap();
/// let difference = find_difference(&image, &image).unwrap();
///
/// assert_eq!(difference.size(), image.size());
/// assert!(difference.as_slice().iter().all(|&v| v == 0.0));
/// ```
pub fn find_difference<T, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<Image<f32, 1>, ImageError>
where
    T: ImageDtype,
{
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.cols(),
            image1.rows(),
            image2.cols(),
            image2.rows(),
        ));
    }

    let gray1 = gray_normalized(image1)?;
    let gray2 = gray_normalized(image2)?;

    let (score, ssim_map) = structural_similarity(&gray1, &gray2, &SsimConfig::default())?;
    log::info!("Similarity of the images: {score}");

    let mut difference = Image::<f32, 1>::from_size_val(ssim_map.size(), 0.0)?;
    normalize_min_max(&ssim_map, &mut difference, 0.0, 1.0)?;

    Ok(difference)
}

/// Transfer the intensity distribution of a reference image to a source image.
///
/// Every channel of `source` is remapped so that its cumulative histogram
/// follows the one of the same channel in `reference`.
///
/// # Arguments
///
/// * `source` - The image to transform with shape (H, W, C).
/// * `reference` - The image providing the distribution, with any size.
///
/// # Returns
///
/// A new image with the shape and pixel type of `source`.
///
/// # Errors
///
/// Returns an error if either image is empty.
pub fn transfer_histogram<T, const C: usize>(
    source: &Image<T, C>,
    reference: &Image<T, C>,
) -> Result<Image<T, C>, ImageError>
where
    T: HistogramValues,
{
    let mut matched = Image::<T, C>::from_size_val(source.size(), T::default())?;
    match_histograms(source, reference, &mut matched)?;
    Ok(matched)
}
