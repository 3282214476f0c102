use crate::error::ImageError;

/// Width and height of an image, in pixels.
///
/// ```
/// use retina_image::ImageSize;
///
/// let size: ImageSize = [640, 480].into();
/// assert_eq!(size.height, 480);
/// assert_eq!(size.area(), 640 * 480);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// `[width, height]`
impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        Self { width, height }
    }
}

/// `[width, height]`, as expected by the rerun image archetypes.
impl From<ImageSize> for [u32; 2] {
    fn from(value: ImageSize) -> Self {
        [value.width as u32, value.height as u32]
    }
}

/// Pixel value types an image can hold.
///
/// `Send + Sync` lets rows be processed on the rayon pool.
pub trait ImageDtype: Copy + Default + PartialOrd + Into<f32> + Send + Sync {
    /// Build a value from an `f32` in the native range of the type.
    fn from_f32(x: f32) -> Self;

    /// Map the value to a normalized intensity, where `1.0` is full scale.
    fn to_norm_f32(self) -> f32;

    /// Build a value from a normalized intensity.
    fn from_norm_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }

    fn to_norm_f32(self) -> f32 {
        self
    }

    fn from_norm_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.clamp(0.0, 255.0).round() as u8
    }

    fn to_norm_f32(self) -> f32 {
        self as f32 / 255.0
    }

    fn from_norm_f32(x: f32) -> Self {
        Self::from_f32(x * 255.0)
    }
}

/// A pixel buffer with a compile time number of channels.
///
/// Pixels are laid out row after row, each one holding `CHANNELS` values,
/// i.e. a (H, W, C) array in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    data: Vec<T>,
    size: ImageSize,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidChannelShape`] when `data` does not hold
    /// exactly `width * height * CHANNELS` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use retina_image::{Image, ImageSize};
    ///
    /// let size = ImageSize {
    ///     width: 3,
    ///     height: 2,
    /// };
    /// let rgb = Image::<u8, 3>::new(size, vec![7; 18]).unwrap();
    /// assert_eq!(rgb.shape(), [2, 3, 3]);
    ///
    /// assert!(Image::<u8, 3>::new(size, vec![7; 17]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { data, size })
    }

    /// An image of the given size with every value set to `val`.
    ///
    /// ```
    /// use retina_image::Image;
    ///
    /// let mask = Image::<f32, 1>::from_size_val([4, 4].into(), 1.0).unwrap();
    /// assert!(mask.as_slice().iter().all(|&v| v == 1.0));
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::new(size, vec![val; size.area() * CHANNELS])
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns, same as [`Image::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows, same as [`Image::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The width in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of values per pixel.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// `[height, width, channels]`
    pub fn shape(&self) -> [usize; 3] {
        [self.size.height, self.size.width, CHANNELS]
    }

    /// Number of values in the buffer.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// True when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw values, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The value at `[row, col, channel]`, `None` when out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [row, col, ch] = index;
        if row >= self.rows() || col >= self.cols() || ch >= CHANNELS {
            return None;
        }
        self.data.get((row * self.cols() + col) * CHANNELS + ch)
    }

    /// Copy one channel out into a single channel image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ChannelIndexOutOfBounds`] if `channel >= CHANNELS`.
    pub fn channel(&self, channel: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Copy,
    {
        if channel >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, CHANNELS));
        }

        let plane = self
            .data
            .chunks_exact(CHANNELS)
            .map(|pixel| pixel[channel])
            .collect();

        Image::new(self.size, plane)
    }

    /// Copy every channel out, in order.
    ///
    /// ```
    /// use retina_image::Image;
    ///
    /// let rgba = Image::<u8, 4>::new([1, 1].into(), vec![1, 2, 3, 4]).unwrap();
    /// let planes = rgba.split_channels().unwrap();
    ///
    /// assert_eq!(planes.len(), 4);
    /// assert_eq!(planes[3].as_slice(), &[4]);
    /// ```
    pub fn split_channels(&self) -> Result<Vec<Image<T, 1>>, ImageError>
    where
        T: Copy,
    {
        (0..CHANNELS).map(|ch| self.channel(ch)).collect()
    }

    /// Interleave `CHANNELS` single channel planes into one image.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of planes differs from `CHANNELS` or if
    /// the planes do not share the same size.
    pub fn from_channels(channels: &[Image<T, 1>]) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        if channels.len() != CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(
                channels.len(),
                CHANNELS,
            ));
        }

        let size = channels.first().ok_or(ImageError::EmptyImage)?.size();
        if let Some(other) = channels.iter().find(|c| c.size() != size) {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                other.width(),
                other.height(),
            ));
        }

        let mut data = Vec::with_capacity(size.area() * CHANNELS);
        for i in 0..size.area() {
            data.extend(channels.iter().map(|c| c.data[i]));
        }

        Image::new(size, data)
    }

    /// Apply `f` to every value, keeping the size and the channel count.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Image<U, CHANNELS>
    where
        T: Copy,
    {
        Image {
            data: self.data.iter().map(|&x| f(x)).collect(),
            size: self.size,
        }
    }
}
