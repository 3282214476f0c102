mod combination;
pub use combination::*;

mod transformation;
pub use transformation::*;
