use rayon::prelude::*;
use retina_image::{Image, ImageDtype, ImageError};

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram, accumulated in place.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use retina_image::{Image, ImageSize};
/// use retina_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 3,
///     },
///     vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                a.iter_mut().zip(b.iter()).for_each(|(x, y)| *x += y);
                a
            },
        );

    hist.iter_mut()
        .zip(counts.iter())
        .for_each(|(h, c)| *h += c);

    Ok(())
}

/// Pixel types whose intensity distribution can be matched.
pub trait HistogramValues: ImageDtype {
    /// Sorted distinct values of a channel together with their number of occurrences.
    fn value_counts(channel: &Image<Self, 1>) -> Result<(Vec<Self>, Vec<usize>), ImageError>;
}

impl HistogramValues for u8 {
    fn value_counts(channel: &Image<u8, 1>) -> Result<(Vec<u8>, Vec<usize>), ImageError> {
        let mut hist = vec![0usize; 256];
        compute_histogram(channel, &mut hist, 256)?;

        Ok(hist
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(value, &count)| (value as u8, count))
            .unzip())
    }
}

impl HistogramValues for f32 {
    fn value_counts(channel: &Image<f32, 1>) -> Result<(Vec<f32>, Vec<usize>), ImageError> {
        let mut sorted = channel.as_slice().to_vec();
        sorted.par_sort_unstable_by(|a, b| a.total_cmp(b));

        let mut values: Vec<f32> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        for v in sorted {
            match values.last() {
                Some(&last) if last == v => {
                    if let Some(count) = counts.last_mut() {
                        *count += 1;
                    }
                }
                _ => {
                    values.push(v);
                    counts.push(1);
                }
            }
        }

        Ok((values, counts))
    }
}

/// Cumulative quantiles `cumsum(counts) / n` of a value count table.
fn cumulative_quantiles(counts: &[usize]) -> Vec<f64> {
    let total = counts.iter().sum::<usize>() as f64;
    counts
        .iter()
        .scan(0usize, |acc, &c| {
            *acc += c;
            Some(*acc as f64 / total)
        })
        .collect()
}

/// One dimensional piecewise linear interpolation over increasing sample points.
///
/// Values of `x` outside of `xp` are clamped to the first or last of `fp`.
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len();
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    // first sample point strictly greater than x
    let hi = xp.partition_point(|&p| p <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Match the intensity distribution of a single channel to a reference channel.
fn match_channel<T: HistogramValues>(
    src: &Image<T, 1>,
    reference: &Image<T, 1>,
) -> Result<Image<T, 1>, ImageError> {
    let (src_values, src_counts) = T::value_counts(src)?;
    let (ref_values, ref_counts) = T::value_counts(reference)?;

    let src_quantiles = cumulative_quantiles(&src_counts);
    let ref_quantiles = cumulative_quantiles(&ref_counts);
    let ref_values = ref_values
        .iter()
        .map(|&v| Into::<f32>::into(v) as f64)
        .collect::<Vec<_>>();

    // new value of every distinct source value
    let mapped = src_quantiles
        .iter()
        .map(|&q| T::from_f32(interp(q, &ref_quantiles, &ref_values) as f32))
        .collect::<Vec<T>>();

    let data = src
        .as_slice()
        .par_iter()
        .map(|v| mapped[src_values.partition_point(|s| s < v)])
        .collect();

    Image::new(src.size(), data)
}

/// Adjust an image so that its cumulative histogram matches the one of a reference.
///
/// Each channel is matched independently: every distinct source value is
/// replaced by the reference value found at the same cumulative quantile,
/// linearly interpolated between the reference quantiles.
///
/// # Arguments
///
/// * `src` - The image to transform with shape (H, W, C).
/// * `reference` - The image providing the target distribution, with any size.
/// * `dst` - The output image with the same shape as `src`.
///
/// # Errors
///
/// Returns an error if `src` or `reference` is empty, or if `dst` and `src` differ in size.
///
/// # Example
///
/// ```
/// use retina_image::Image;
/// use retina_imgproc::histogram::match_histograms;
///
/// let src = Image::<f32, 1>::new([4, 1].into(), vec![0.0, 0.1, 0.2, 0.3]).unwrap();
/// let reference = Image::<f32, 1>::new([4, 1].into(), vec![0.9, 0.6, 0.8, 0.7]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// match_histograms(&src, &reference, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0.6, 0.7, 0.8, 0.9]);
/// ```
pub fn match_histograms<T, const C: usize>(
    src: &Image<T, C>,
    reference: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: HistogramValues,
{
    if src.is_empty() || reference.is_empty() {
        return Err(ImageError::EmptyImage);
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let matched = src
        .split_channels()?
        .iter()
        .zip(reference.split_channels()?.iter())
        .map(|(s, r)| match_channel(s, r))
        .collect::<Result<Vec<_>, _>>()?;

    dst.as_slice_mut()
        .copy_from_slice(Image::<T, C>::from_channels(&matched)?.as_slice());

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use retina_image::{Image, ImageError, ImageSize};

    #[test]
    fn test_compute_histogram() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
        )?;

        let mut histogram = vec![0; 3];

        super::compute_histogram(&image, &mut histogram, 3)?;
        assert_eq!(histogram, vec![3, 3, 3]);

        let mut wrong = vec![0; 2];
        assert!(super::compute_histogram(&image, &mut wrong, 3).is_err());

        Ok(())
    }

    #[test]
    fn test_interp() {
        let xp = [0.25, 0.5, 1.0];
        let fp = [10.0, 20.0, 40.0];
        assert_relative_eq!(super::interp(0.0, &xp, &fp), 10.0);
        assert_relative_eq!(super::interp(0.375, &xp, &fp), 15.0);
        assert_relative_eq!(super::interp(0.75, &xp, &fp), 30.0);
        assert_relative_eq!(super::interp(1.0, &xp, &fp), 40.0);
    }

    #[test]
    fn test_value_counts_u8() -> Result<(), ImageError> {
        use super::HistogramValues;

        let image = Image::<u8, 1>::new([5, 1].into(), vec![7, 3, 7, 7, 200])?;
        let (values, counts) = u8::value_counts(&image)?;
        assert_eq!(values, vec![3, 7, 200]);
        assert_eq!(counts, vec![1, 3, 1]);

        Ok(())
    }

    #[test]
    fn test_match_histograms_rgb_u8() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 1,
        };

        #[rustfmt::skip]
        let src = Image::<u8, 3>::new(size, vec![
            0, 10, 5,
            1, 20, 5,
            2, 30, 5,
            3, 40, 5,
        ])?;

        #[rustfmt::skip]
        let reference = Image::<u8, 3>::new(size, vec![
            100, 0, 9,
            200, 0, 9,
            150, 0, 9,
            250, 0, 9,
        ])?;

        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
        super::match_histograms(&src, &reference, &mut dst)?;

        let channels = dst.split_channels()?;
        assert_eq!(channels[0].as_slice(), &[100, 150, 200, 250]);
        assert_eq!(channels[1].as_slice(), &[0, 0, 0, 0]);
        assert_eq!(channels[2].as_slice(), &[9, 9, 9, 9]);

        Ok(())
    }

    #[test]
    fn test_match_histograms_idempotent() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 8,
            height: 2,
        };
        let src_data = (0..16).map(|i| ((i * 7) % 16) as f32 / 16.0).collect();
        let ref_data = (0..16).map(|i| (i as f32 / 16.0).powi(2)).collect();

        let src = Image::<f32, 1>::new(size, src_data)?;
        let reference = Image::<f32, 1>::new(size, ref_data)?;

        let mut once = Image::<f32, 1>::from_size_val(size, 0.0)?;
        super::match_histograms(&src, &reference, &mut once)?;

        let mut twice = Image::<f32, 1>::from_size_val(size, 0.0)?;
        super::match_histograms(&once, &reference, &mut twice)?;

        assert_eq!(once, twice);

        Ok(())
    }

    #[test]
    fn test_match_histograms_empty() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let reference = Image::<u8, 1>::from_size_val([2, 2].into(), 1)?;
        let mut dst = src.clone();
        assert_eq!(
            super::match_histograms(&src, &reference, &mut dst),
            Err(ImageError::EmptyImage)
        );
        Ok(())
    }
}
