mod ssim;
pub use ssim::*;
