use rayon::prelude::*;
use retina_image::{Image, ImageError};

use crate::{filter, padding::PaddingMode};

/// Parameters of the structural similarity index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsimConfig {
    /// Side length of the square sliding window, odd.
    pub win_size: usize,
    /// Stabilization constant of the luminance term.
    pub k1: f32,
    /// Stabilization constant of the contrast term.
    pub k2: f32,
    /// Dynamic range of the input values.
    pub data_range: f32,
    /// Normalize the local covariances by `NP - 1` instead of `NP`.
    pub use_sample_covariance: bool,
}

impl Default for SsimConfig {
    fn default() -> Self {
        Self {
            win_size: 7,
            k1: 0.01,
            k2: 0.03,
            data_range: 1.0,
            use_sample_covariance: true,
        }
    }
}

/// Compute the mean structural similarity index between two images.
///
/// Local means, variances and covariance are taken over a uniform
/// `win_size` x `win_size` window, mirroring the image at the borders
/// (edge pixel included). The score is the mean of the similarity map
/// after cropping `(win_size - 1) / 2` pixels on every side.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, 1).
/// * `image2` - The second input image with shape (H, W, 1).
/// * `config` - The window and constants of the index.
///
/// # Returns
///
/// The similarity score and the full similarity map, both in [-1, 1].
///
/// # Errors
///
/// Returns an error if the images differ in size or if the window is even
/// or larger than the image.
///
/// # Example
///
/// ```
/// use retina_image::Image;
/// use retina_imgproc::metrics::{structural_similarity, SsimConfig};
///
/// let image = Image::<f32, 1>::from_size_val([16, 16].into(), 0.5).unwrap();
/// let (score, map) = structural_similarity(&image, &image, &SsimConfig::default()).unwrap();
///
/// assert_eq!(score, 1.0);
/// assert_eq!(map.size(), image.size());
/// ```
pub fn structural_similarity(
    image1: &Image<f32, 1>,
    image2: &Image<f32, 1>,
    config: &SsimConfig,
) -> Result<(f32, Image<f32, 1>), ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.cols(),
            image1.rows(),
            image2.cols(),
            image2.rows(),
        ));
    }

    let (rows, cols) = (image1.rows(), image1.cols());
    let win_size = config.win_size;
    if win_size % 2 == 0 || win_size > rows || win_size > cols {
        return Err(ImageError::InvalidSsimWindow(win_size, cols, rows));
    }

    // x, y, x^2, y^2 and x*y stacked so that one filter pass yields all local moments
    let stacked = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice())
        .flat_map(|(&x, &y)| [x, y, x * x, y * y, x * y])
        .collect();
    let stacked = Image::<f32, 5>::new(image1.size(), stacked)?;

    let mut moments = Image::<f32, 5>::from_size_val(image1.size(), 0.0)?;
    filter::box_blur(
        &stacked,
        &mut moments,
        (win_size, win_size),
        PaddingMode::Reflect,
    )?;

    let np = (win_size * win_size) as f32;
    let cov_norm = if config.use_sample_covariance {
        np / (np - 1.0)
    } else {
        1.0
    };
    let c1 = (config.k1 * config.data_range).powi(2);
    let c2 = (config.k2 * config.data_range).powi(2);

    let ssim_map = moments
        .as_slice()
        .par_chunks_exact(5)
        .map(|m| {
            let (ux, uy, uxx, uyy, uxy) = (m[0], m[1], m[2], m[3], m[4]);
            let vx = cov_norm * (uxx - ux * ux);
            let vy = cov_norm * (uyy - uy * uy);
            let vxy = cov_norm * (uxy - ux * uy);

            let a1 = 2.0 * ux * uy + c1;
            let a2 = 2.0 * vxy + c2;
            let b1 = ux * ux + uy * uy + c1;
            let b2 = vx + vy + c2;

            (a1 * a2) / (b1 * b2)
        })
        .collect();
    let ssim_map = Image::<f32, 1>::new(image1.size(), ssim_map)?;

    // mean over the region not affected by the border padding
    let pad = (win_size - 1) / 2;
    let (sum, count) = ssim_map
        .as_slice()
        .chunks_exact(cols)
        .skip(pad)
        .take(rows - 2 * pad)
        .flat_map(|row| &row[pad..cols - pad])
        .fold((0f64, 0usize), |(sum, count), &v| (sum + v as f64, count + 1));
    let score = (sum / count as f64) as f32;

    log::debug!(
        "structural similarity of {} images: {score}",
        image1.size()
    );

    Ok((score, ssim_map))
}
