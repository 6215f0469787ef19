use argh::FromArgs;
use std::path::PathBuf;

use lensfx::{
    imgproc::distortion::distort,
    io::{functional as F, FilePresenter, ImagePresenter},
};

#[derive(FromArgs)]
/// Apply a radial barrel distortion to an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory to write the results to
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// the cubic radial coefficient
    #[argh(option, default = "0.1")]
    k3: f64,

    /// the quintic radial coefficient
    #[argh(option, default = "0.12")]
    k5: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let image = F::read_image_any_rgb8(&args.image_path)?;
    log::info!("loaded {} with size {}", args.image_path.display(), image.size());

    let mut presenter = FilePresenter::new(&args.output_dir)?;
    presenter.present_rgb8("Original Image", &image)?;

    let barrel = distort(&image, args.k3, args.k5)?;
    log::debug!("distorted with k3 = {} and k5 = {}", args.k3, args.k5);

    presenter.present_rgb8("Barrel Effect", &barrel)?;

    Ok(())
}
