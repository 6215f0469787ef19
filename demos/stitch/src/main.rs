use argh::FromArgs;
use std::path::PathBuf;

use lensfx::{
    imgproc::stitch::stitch_vertical,
    io::{functional as F, FilePresenter, ImagePresenter},
};

#[derive(FromArgs)]
/// Stitch two overlapping images on top of each other
struct Args {
    /// path to the upper image
    #[argh(option, short = 't')]
    top_path: PathBuf,

    /// path to the lower image
    #[argh(option, short = 'b')]
    bottom_path: PathBuf,

    /// directory to write the results to
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// number of rows at the bottom of the upper image used to find the overlap
    #[argh(option, default = "10")]
    template_rows: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let top = F::read_image_any_rgb8(&args.top_path)?;
    let bottom = F::read_image_any_rgb8(&args.bottom_path)?;
    log::info!("top image {}, bottom image {}", top.size(), bottom.size());

    let mut presenter = FilePresenter::new(&args.output_dir)?;

    let combined = stitch_vertical(&top, &bottom, args.template_rows)?;
    presenter.present_rgb8("Combined Image", &combined)?;

    Ok(())
}
