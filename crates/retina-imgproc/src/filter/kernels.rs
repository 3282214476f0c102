/// Normalized box kernel of `kernel_size` equal taps.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Sampled gaussian of `kernel_size` taps centered on the middle tap.
///
/// The taps are normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let center = kernel_size.saturating_sub(1) as f32 / 2.0;
    let denom = 2.0 * sigma * sigma;

    let taps = (0..kernel_size)
        .map(|i| {
            let d = i as f32 - center;
            (-d * d / denom).exp()
        })
        .collect::<Vec<_>>();

    let total = taps.iter().sum::<f32>();
    taps.into_iter().map(|t| t / total).collect()
}

/// Radius of a gaussian kernel truncated at `truncate` standard deviations.
pub fn gaussian_kernel_radius(sigma: f32, truncate: f32) -> usize {
    (truncate * sigma + 0.5) as usize
}
