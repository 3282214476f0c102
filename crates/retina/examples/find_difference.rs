use std::path::PathBuf;

use argh::FromArgs;

use retina::processing::find_difference;
use retina::utils::{io, plot};

#[derive(FromArgs, Debug)]
/// Find the regions where two images differ.
struct Args {
    /// path to the first image
    #[argh(option, short = 'a')]
    image1: PathBuf,

    /// path to the second image
    #[argh(option, short = 'b')]
    image2: PathBuf,

    /// path where the normalized difference map is written
    #[argh(option, short = 'o', default = "PathBuf::from(\"difference.png\")")]
    output: PathBuf,

    /// optional path of a figure with both inputs and the result
    #[argh(option, short = 'f')]
    figure: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let image1 = io::read_image_any_rgb8(&args.image1)?;
    let image2 = io::read_image_any_rgb8(&args.image2)?;

    let difference = find_difference(&image1, &image2)?;
    io::save_image(&difference, &args.output)?;
    log::info!("difference map written to {}", args.output.display());

    if let Some(figure_path) = args.figure {
        let figure = plot::plot_result(
            &[&image1, &image2, &difference],
            &plot::PlotStyle::default(),
        )?;
        figure.save(&figure_path)?;
        log::info!("figure written to {}", figure_path.display());
    }

    Ok(())
}
