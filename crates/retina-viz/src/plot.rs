use retina_image::{Image, ImageDtype, ImageError, ImageSize};
use retina_imgproc::{
    color, histogram::compute_histogram, interpolation::InterpolationMode, normalize,
    resize::resize_native,
};

use crate::{
    error::VizError,
    figure::{Figure, PlotStyle},
};

/// Images that can be drawn as a figure panel.
pub trait ToPanel {
    /// Render the image as an 8-bit RGB panel.
    fn to_panel(&self) -> Result<Image<u8, 3>, VizError>;
}

impl<T: ImageDtype, const C: usize> ToPanel for Image<T, C> {
    /// Single and two channel images are shown with a gray colormap scaled to
    /// their value range. Color images show their first three channels as
    /// normalized intensities, values outside of `[0, 1]` are clipped.
    fn to_panel(&self) -> Result<Image<u8, 3>, VizError> {
        let mut panel = Image::<u8, 3>::from_size_val(self.size(), 0)?;

        match C {
            0 => return Err(VizError::UnsupportedChannels(C)),
            1 | 2 => {
                let gray = self.channel(0)?.map(ImageDtype::to_norm_f32);
                if gray.is_empty() {
                    return Ok(panel);
                }
                let mut scaled = Image::<f32, 1>::from_size_val(gray.size(), 0.0)?;
                normalize::normalize_min_max(&gray, &mut scaled, 0.0, 255.0)?;
                color::rgb_from_gray(&scaled.map(u8::from_f32), &mut panel)?;
            }
            _ => {
                panel
                    .as_slice_mut()
                    .chunks_exact_mut(3)
                    .zip(self.as_slice().chunks_exact(C))
                    .for_each(|(dst, src)| {
                        dst.iter_mut()
                            .zip(src)
                            .for_each(|(d, &s)| *d = u8::from_norm_f32(s.to_norm_f32()));
                    });
            }
        }

        Ok(panel)
    }
}

/// Render a single image into a figure.
///
/// # Arguments
///
/// * `image` - The image to show.
/// * `style` - The layout of the figure.
///
/// # Example
///
/// ```
/// use retina_image::Image;
/// use retina_viz::{plot_image, PlotStyle};
///
/// let image = Image::<f32, 1>::new([2, 1].into(), vec![0.2, 0.4]).unwrap();
/// let figure = plot_image(&image, &PlotStyle::default()).unwrap();
///
/// assert_eq!(figure.size().width, 2 + 2 * 8);
/// ```
pub fn plot_image<P: ToPanel>(image: &P, style: &PlotStyle) -> Result<Figure, VizError> {
    plot_result(&[image as &dyn ToPanel], style)
}

/// Render several images side by side in a single row.
///
/// Panels keep the order of `images`, by convention the inputs first and the
/// result last. Panels shorter than the tallest one are scaled up to its
/// height, keeping their aspect ratio.
///
/// The figure holds raw pixels only. Panels carry no titles, axes or labels,
/// so captions such as "Image 1" or "Result" belong to whatever displays the
/// figure.
///
/// # Arguments
///
/// * `images` - The images to show, at least one.
/// * `style` - The layout of the figure.
///
/// # Errors
///
/// Returns an error if `images` is empty or an image cannot be displayed.
pub fn plot_result(images: &[&dyn ToPanel], style: &PlotStyle) -> Result<Figure, VizError> {
    if images.is_empty() {
        return Err(VizError::EmptyFigure);
    }

    let panels = images
        .iter()
        .map(|image| image.to_panel())
        .collect::<Result<Vec<_>, _>>()?;

    let height = panels.iter().map(|p| p.height()).max().unwrap_or(0);

    let panels = panels
        .into_iter()
        .map(|panel| {
            if panel.height() == height || panel.is_empty() {
                return Ok(panel);
            }
            let width = (panel.width() as f64 * height as f64 / panel.height() as f64).round();
            let mut scaled = Image::<u8, 3>::from_size_val(
                ImageSize {
                    width: width as usize,
                    height,
                },
                0,
            )?;
            resize_native(&panel, &mut scaled, InterpolationMode::Nearest)?;
            Ok(scaled)
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    let width = panels.iter().map(|p| p.width() + style.margin).sum::<usize>() + style.margin;
    let size = ImageSize {
        width,
        height: height + 2 * style.margin,
    };

    log::debug!("rendering {} panels into a {} figure", panels.len(), size);

    let mut figure = Figure::new(size, style.background)?;
    let mut x = style.margin;
    for panel in panels.iter() {
        figure.draw_image(panel, x, style.margin);
        x += panel.width() + style.margin;
    }

    Ok(figure)
}

/// Render the red, green and blue histograms of an image.
///
/// Each channel is drawn as a 256 bin bar chart, the three charts share the
/// same vertical scale.
///
/// # Arguments
///
/// * `image` - The RGB image.
/// * `style` - The layout and bar colors of the figure.
///
/// # Errors
///
/// Returns an error if the image is empty.
pub fn plot_histogram(image: &Image<u8, 3>, style: &PlotStyle) -> Result<Figure, VizError> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage.into());
    }

    let histograms = image
        .split_channels()?
        .iter()
        .map(|channel| {
            let mut hist = vec![0usize; 256];
            compute_histogram(channel, &mut hist, 256)?;
            Ok(hist)
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    let max_count = histograms
        .iter()
        .flat_map(|h| h.iter())
        .copied()
        .max()
        .unwrap_or(1)
        .max(1);

    let chart_width = 256 * style.bar_width;
    let size = ImageSize {
        width: 3 * (chart_width + style.margin) + style.margin,
        height: style.histogram_height + 2 * style.margin,
    };

    let mut figure = Figure::new(size, style.background)?;
    let baseline = style.margin + style.histogram_height;

    for (i, (hist, color)) in histograms.iter().zip(style.channel_colors).enumerate() {
        let x0 = style.margin + i * (chart_width + style.margin);
        for (bin, &count) in hist.iter().enumerate() {
            let bar = (count as f64 / max_count as f64 * style.histogram_height as f64).round()
                as usize;
            figure.fill_rect(
                x0 + bin * style.bar_width,
                baseline - bar,
                style.bar_width,
                bar,
                color,
            );
        }
    }

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_gray_is_min_max_scaled() -> Result<(), VizError> {
        let image = Image::<f32, 1>::new([3, 1].into(), vec![0.25, 0.5, 0.75])?;
        let panel = image.to_panel()?;
        assert_eq!(panel.as_slice(), &[0, 0, 0, 128, 128, 128, 255, 255, 255]);

        let constant = Image::<u8, 1>::from_size_val([2, 2].into(), 90)?;
        assert!(constant.to_panel()?.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn panel_rgba_drops_alpha() -> Result<(), VizError> {
        let image = Image::<u8, 4>::new([1, 1].into(), vec![10, 20, 30, 0])?;
        assert_eq!(image.to_panel()?.as_slice(), &[10, 20, 30]);
        Ok(())
    }

    #[test]
    fn plot_result_layout() -> Result<(), VizError> {
        let style = PlotStyle::default();
        let a = Image::<u8, 3>::from_size_val([4, 4].into(), 1)?;
        let b = Image::<u8, 1>::from_size_val([2, 2].into(), 2)?;
        let c = Image::<f32, 1>::from_size_val([3, 4].into(), 0.5)?;

        let figure = plot_result(&[&a, &b, &c], &style)?;
        let m = style.margin;
        assert_eq!(
            figure.size(),
            ImageSize {
                width: 4 + 4 + 3 + 4 * m,
                height: 4 + 2 * m,
            }
        );
        // first panel starts after the margin
        assert_eq!(figure.as_image().get([m, m, 0]), Some(&1));
        assert_eq!(figure.as_image().get([0, 0, 0]), Some(&255));

        assert!(matches!(
            plot_result(&[], &style),
            Err(VizError::EmptyFigure)
        ));

        Ok(())
    }

    #[test]
    fn plot_result_holds_only_panel_pixels() -> Result<(), VizError> {
        let style = PlotStyle {
            margin: 0,
            ..Default::default()
        };
        let a = Image::<u8, 3>::from_size_val([2, 2].into(), 10)?;
        let b = Image::<u8, 3>::from_size_val([3, 2].into(), 200)?;

        // no title or label rows are added above or below the panels
        let figure = plot_result(&[&a, &b], &style)?;
        assert_eq!(figure.size(), ImageSize { width: 5, height: 2 });

        let row = [[10u8; 6].as_slice(), [200u8; 9].as_slice()].concat();
        let expected = [row.as_slice(), row.as_slice()].concat();
        assert_eq!(figure.as_image().as_slice(), expected.as_slice());

        Ok(())
    }

    #[test]
    fn plot_image_single_panel() -> Result<(), VizError> {
        let style = PlotStyle {
            margin: 0,
            ..Default::default()
        };
        let image = Image::<u8, 3>::from_size_val([5, 3].into(), 42)?;
        let figure = plot_image(&image, &style)?;
        assert_eq!(figure.as_image(), &image);
        Ok(())
    }

    #[test]
    fn plot_histogram_shared_scale() -> Result<(), VizError> {
        let style = PlotStyle {
            margin: 0,
            bar_width: 1,
            histogram_height: 10,
            ..Default::default()
        };

        // red is always 0, green splits between 0 and 255, blue is always 255
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new([2, 1].into(), vec![
            0, 0, 255,
            0, 255, 255,
        ])?;

        let figure = plot_histogram(&image, &style)?;
        assert_eq!(figure.size(), ImageSize { width: 768, height: 10 });

        let canvas = figure.as_image();
        let [red, green, blue] = style.channel_colors;
        // full bar for red value 0 reaches the top row
        assert_eq!(canvas.get([0, 0, 1]), Some(&red[1]));
        // green value 0 holds half of the pixels, so half the height
        assert_eq!(canvas.get([4, 256, 1]), Some(&255));
        assert_eq!(canvas.get([5, 256, 1]), Some(&green[1]));
        assert_eq!(canvas.get([0, 767, 0]), Some(&blue[0]));

        let empty = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        assert!(plot_histogram(&empty, &style).is_err());

        Ok(())
    }
}
