use rayon::prelude::*;
use retina_image::{Image, ImageError};

use crate::padding::PaddingMode;

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct caches the kernel data and precomputed offsets for efficient filtering.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
    padding: PaddingMode,
}

impl<'a> SeparableFilter<'a> {
    fn new(kernel_x: &'a [f32], kernel_y: &'a [f32], padding: PaddingMode) -> Self {
        let offsets = |len: usize| -> Vec<isize> {
            let half = (len / 2) as isize;
            (0..len as isize).map(|i| i - half).collect()
        };

        Self {
            kernel_x,
            kernel_y,
            offsets_x: offsets(kernel_x.len()),
            offsets_y: offsets(kernel_y.len()),
            padding,
        }
    }

    /// Horizontal pass followed by a vertical pass through a temporary buffer.
    fn apply<const C: usize>(&self, src: &[f32], dst: &mut [f32], rows: usize, cols: usize) {
        let stride = cols * C;
        let mut temp = vec![0.0f32; src.len()];

        // horizontal
        temp.par_chunks_exact_mut(stride)
            .zip(src.par_chunks_exact(stride))
            .for_each(|(temp_row, src_row)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                        let x = self.padding.map_index(c as isize + off, cols);
                        let px = &src_row[x * C..x * C + C];
                        acc.iter_mut().zip(px).for_each(|(a, &v)| *a += v * k);
                    }
                    temp_row[c * C..c * C + C].copy_from_slice(&acc);
                }
            });

        // vertical
        dst.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(r, dst_row)| {
                dst_row.iter_mut().for_each(|v| *v = 0.0);
                for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                    let y = self.padding.map_index(r as isize + off, rows);
                    let temp_row = &temp[y * stride..(y + 1) * stride];
                    dst_row
                        .iter_mut()
                        .zip(temp_row)
                        .for_each(|(d, &t)| *d += t * k);
                }
            });
    }
}

/// Apply a separable filter to an image.
///
/// The kernels are centered on each pixel and out of range accesses are
/// resolved with the given padding mode.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `dst` - The output image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel, with an odd length.
/// * `kernel_y` - The vertical kernel, with an odd length.
/// * `padding` - How to sample pixels outside of the image.
///
/// # Errors
///
/// Returns an error if the images differ in size or a kernel length is even or zero.
pub fn separable_filter<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    padding: PaddingMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    for kernel in [kernel_x, kernel_y] {
        if kernel.len() % 2 == 0 {
            return Err(ImageError::InvalidKernelLength(kernel.len()));
        }
    }

    if src.is_empty() {
        return Ok(());
    }

    let (rows, cols) = (src.rows(), src.cols());
    SeparableFilter::new(kernel_x, kernel_y, padding).apply::<C>(
        src.as_slice(),
        dst.as_slice_mut(),
        rows,
        cols,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use retina_image::ImageSize;

    #[test]
    fn test_separable_filter_impulse() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        let mut img = Image::<f32, 1>::from_size_val(size, 0.0)?;
        img.as_slice_mut()[2 * 5 + 2] = 9.0;

        let mut dst = Image::<f32, 1>::from_size_val(size, 0.0)?;
        let kernel = [1.0 / 3.0; 3];
        separable_filter(&img, &mut dst, &kernel, &kernel, PaddingMode::Reflect)?;

        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ];

        for (a, b) in dst.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn test_separable_filter_reflect_border() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::new([3, 1].into(), vec![1.0, 2.0, 3.0])?;
        let mut dst = Image::<f32, 1>::from_size_val(img.size(), 0.0)?;
        let kernel = [1.0 / 3.0; 3];

        separable_filter(&img, &mut dst, &kernel, &[1.0], PaddingMode::Reflect)?;
        // left border: (1 + 1 + 2) / 3, right border: (2 + 3 + 3) / 3
        assert_relative_eq!(dst.as_slice()[0], 4.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(dst.as_slice()[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(dst.as_slice()[2], 8.0 / 3.0, epsilon = 1e-6);

        separable_filter(&img, &mut dst, &kernel, &[1.0], PaddingMode::Reflect101)?;
        // left border: (2 + 1 + 2) / 3
        assert_relative_eq!(dst.as_slice()[0], 5.0 / 3.0, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn test_separable_filter_multichannel() -> Result<(), ImageError> {
        let img = Image::<f32, 3>::from_size_val([4, 3].into(), 0.5)?;
        let mut dst = Image::<f32, 3>::from_size_val(img.size(), 0.0)?;
        let kernel = [0.25, 0.5, 0.25];

        separable_filter(&img, &mut dst, &kernel, &kernel, PaddingMode::Reflect)?;
        dst.as_slice()
            .iter()
            .for_each(|&v| assert_relative_eq!(v, 0.5, epsilon = 1e-6));

        Ok(())
    }

    #[test]
    fn test_separable_filter_even_kernel() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val([4, 4].into(), 0.0)?;
        let mut dst = img.clone();
        let res = separable_filter(&img, &mut dst, &[0.5, 0.5], &[1.0], PaddingMode::Reflect);
        assert_eq!(res, Err(ImageError::InvalidKernelLength(2)));
        Ok(())
    }
}
