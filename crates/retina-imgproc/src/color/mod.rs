mod gray;

pub use gray::{gray_normalized, rgb_from_gray};
