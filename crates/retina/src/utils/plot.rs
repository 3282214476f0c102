pub use retina_viz::{plot_histogram, plot_image, plot_result, Figure, PlotStyle, ToPanel};
