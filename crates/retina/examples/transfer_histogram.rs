use std::path::PathBuf;

use argh::FromArgs;

use retina::processing::transfer_histogram;
use retina::utils::{io, plot};

#[derive(FromArgs, Debug)]
/// Match the color distribution of an image to a reference image.
struct Args {
    /// path to the image to transform
    #[argh(option, short = 's')]
    source: PathBuf,

    /// path to the reference image
    #[argh(option, short = 'r')]
    reference: PathBuf,

    /// path where the matched image is written
    #[argh(option, short = 'o', default = "PathBuf::from(\"matched.png\")")]
    output: PathBuf,

    /// optional path of a figure with the histogram of the matched image
    #[argh(option)]
    histogram: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let source = io::read_image_any_rgb8(&args.source)?;
    let reference = io::read_image_any_rgb8(&args.reference)?;

    let matched = transfer_histogram(&source, &reference)?;
    io::save_image(&matched, &args.output)?;
    log::info!("matched image written to {}", args.output.display());

    if let Some(histogram_path) = args.histogram {
        let figure = plot::plot_histogram(&matched, &plot::PlotStyle::default())?;
        figure.save(&histogram_path)?;
    }

    Ok(())
}
