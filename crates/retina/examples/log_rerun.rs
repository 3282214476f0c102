use std::path::PathBuf;

use argh::FromArgs;

use retina::processing::find_difference;
use retina::utils::{io, plot};
use retina::viz::rerun;

#[derive(FromArgs, Debug)]
/// Compare two images and show the result in the rerun viewer.
struct Args {
    /// path to the first image
    #[argh(option, short = 'a')]
    image1: PathBuf,

    /// path to the second image
    #[argh(option, short = 'b')]
    image2: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let image1 = io::read_image_any_rgb8(&args.image1)?;
    let image2 = io::read_image_any_rgb8(&args.image2)?;
    let difference = find_difference(&image1, &image2)?;

    let rec = rerun::RecordingStreamBuilder::new("retina").spawn()?;

    let style = plot::PlotStyle::default();
    plot::plot_result(&[&image1, &image2, &difference], &style)?.log_rerun(&rec, "result")?;
    plot::plot_histogram(&image1, &style)?.log_rerun(&rec, "histogram/image1")?;
    plot::plot_histogram(&image2, &style)?.log_rerun(&rec, "histogram/image2")?;

    Ok(())
}
