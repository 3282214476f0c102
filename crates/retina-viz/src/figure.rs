use std::path::Path;

use retina_image::{Image, ImageSize};

use crate::error::VizError;

/// Layout and colors used when rendering figures.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Color of the figure background.
    pub background: [u8; 3],
    /// Space in pixels around and between panels.
    pub margin: usize,
    /// Height in pixels of the histogram bars area.
    pub histogram_height: usize,
    /// Width in pixels of a single histogram bin.
    pub bar_width: usize,
    /// Bar colors of the red, green and blue histograms.
    pub channel_colors: [[u8; 3]; 3],
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            margin: 8,
            histogram_height: 200,
            bar_width: 2,
            // red, green and blue at 80% opacity over white
            channel_colors: [[255, 51, 51], [51, 153, 51], [51, 51, 255]],
        }
    }
}

/// A rendered figure backed by an 8-bit RGB canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    canvas: Image<u8, 3>,
}

impl Figure {
    /// Create a figure of the given size filled with a background color.
    pub fn new(size: ImageSize, background: [u8; 3]) -> Result<Self, VizError> {
        let data = background
            .iter()
            .copied()
            .cycle()
            .take(size.area() * 3)
            .collect();

        Ok(Self {
            canvas: Image::new(size, data)?,
        })
    }

    /// The size of the figure in pixels.
    pub fn size(&self) -> ImageSize {
        self.canvas.size()
    }

    /// The rendered pixels.
    pub fn as_image(&self) -> &Image<u8, 3> {
        &self.canvas
    }

    /// Consume the figure and return the rendered pixels.
    pub fn into_image(self) -> Image<u8, 3> {
        self.canvas
    }

    /// Copy an image onto the canvas with its top left corner at `(x, y)`.
    ///
    /// Pixels falling outside of the canvas are dropped.
    pub fn draw_image(&mut self, image: &Image<u8, 3>, x: usize, y: usize) {
        let canvas_cols = self.canvas.cols();
        let canvas_rows = self.canvas.rows();
        if x >= canvas_cols || y >= canvas_rows {
            return;
        }

        let w = image.cols().min(canvas_cols - x);
        let h = image.rows().min(canvas_rows - y);
        let src = image.as_slice();
        let dst = self.canvas.as_slice_mut();

        for r in 0..h {
            let src_start = r * image.cols() * 3;
            let dst_start = ((y + r) * canvas_cols + x) * 3;
            dst[dst_start..dst_start + w * 3].copy_from_slice(&src[src_start..src_start + w * 3]);
        }
    }

    /// Fill a rectangle with a solid color, clipped to the canvas.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: [u8; 3]) {
        let canvas_cols = self.canvas.cols();
        let x_end = (x + width).min(canvas_cols);
        let y_end = (y + height).min(self.canvas.rows());
        let dst = self.canvas.as_slice_mut();

        for r in y..y_end {
            for c in x..x_end {
                let i = (r * canvas_cols + c) * 3;
                dst[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    /// Write the figure to disk, the extension selects the image format.
    pub fn save(&self, file_path: impl AsRef<Path>) -> Result<(), VizError> {
        retina_io::functional::write_image(file_path, &self.canvas)?;
        Ok(())
    }

    /// Log the figure as an RGB image to a rerun recording stream.
    #[cfg(feature = "rerun")]
    pub fn log_rerun(
        &self,
        rec: &rerun::RecordingStream,
        entity_path: &str,
    ) -> Result<(), VizError> {
        rec.log(
            entity_path,
            &rerun::Image::from_elements(
                self.canvas.as_slice(),
                self.canvas.size().into(),
                rerun::ColorModel::RGB,
            ),
        )?;
        Ok(())
    }
}
