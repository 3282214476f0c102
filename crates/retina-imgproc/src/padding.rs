/// How a filter or a sampler resolves indices that fall outside of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// Clamp to the border pixel: `a a a | a b c d`.
    Replicate,

    /// Mirror around the border, repeating the border pixel: `c b a | a b c d`.
    #[default]
    Reflect,

    /// Mirror around the border pixel without repeating it: `d c b | a b c d`.
    Reflect101,
}

impl PaddingMode {
    /// Fold an index of a row or column of `len` samples into `[0, len)`.
    ///
    /// `len` must be greater than zero. Indices further than one period away
    /// from the image keep bouncing between both borders.
    ///
    /// ```
    /// use retina_imgproc::padding::PaddingMode;
    ///
    /// assert_eq!(PaddingMode::Reflect.map_index(-1, 4), 0);
    /// assert_eq!(PaddingMode::Reflect101.map_index(-1, 4), 1);
    /// assert_eq!(PaddingMode::Replicate.map_index(9, 4), 3);
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        let last = len as isize - 1;
        if (0..=last).contains(&i) {
            return i as usize;
        }
        if len == 1 {
            return 0;
        }

        match self {
            PaddingMode::Replicate => i.clamp(0, last) as usize,
            PaddingMode::Reflect => {
                // period of the mirrored signal, border pixels repeated
                let period = 2 * (last + 1);
                let j = i.rem_euclid(period);
                (if j > last { period - 1 - j } else { j }) as usize
            }
            PaddingMode::Reflect101 => {
                let period = 2 * last;
                let j = i.rem_euclid(period);
                (if j > last { period - j } else { j }) as usize
            }
        }
    }
}
