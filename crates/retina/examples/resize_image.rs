use std::path::PathBuf;

use argh::FromArgs;

use retina::processing::resize_image;
use retina::utils::io::{self, GenericImage};

#[derive(FromArgs, Debug)]
/// Scale an image down by a proportion of its size.
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// scale factor in [0, 1]
    #[argh(option, short = 'p', default = "0.5")]
    proportion: f64,

    /// path where the resized image is written
    #[argh(option, short = 'o', default = "PathBuf::from(\"resized.png\")")]
    output: PathBuf,

    /// read the image as grayscale
    #[argh(switch, short = 'g')]
    gray: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let image = io::read_image(&args.image_path, args.gray)?;
    log::info!(
        "read {} image with {} channels",
        image.size(),
        image.num_channels()
    );

    match image {
        GenericImage::Mono8(image) => {
            io::save_image(&resize_image(&image, args.proportion)?, &args.output)?
        }
        GenericImage::MonoAlpha8(image) => {
            io::save_image(&resize_image(&image, args.proportion)?, &args.output)?
        }
        GenericImage::Rgb8(image) => {
            io::save_image(&resize_image(&image, args.proportion)?, &args.output)?
        }
        GenericImage::Rgba8(image) => {
            io::save_image(&resize_image(&image, args.proportion)?, &args.output)?
        }
    }

    log::info!("resized image written to {}", args.output.display());

    Ok(())
}
