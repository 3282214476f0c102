mod bilinear;
mod nearest;

use retina_image::Image;

use crate::padding::PaddingMode;

/// How sub-pixel positions are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Weighted average of the four surrounding pixels.
    #[default]
    Bilinear,
    /// Value of the closest pixel.
    Nearest,
}

/// Sample an image at a sub-pixel location.
///
/// `u` is the column and `v` the row coordinate, pixel centers sit on
/// integers. Neighbours outside of the image are folded back with `padding`.
/// The image must not be empty.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    padding: PaddingMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear::bilinear_interpolation(image, u, v, padding),
        InterpolationMode::Nearest => nearest::nearest_neighbor_interpolation(image, u, v, padding),
    }
}
