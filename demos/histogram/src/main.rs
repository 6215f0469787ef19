use argh::FromArgs;
use std::path::PathBuf;

use lensfx::{
    image::Image,
    imgproc::{
        color::gray_from_rgb_u8,
        histogram::{compute_histogram, equalize_histogram_rgb},
        projection::{center_row_profile, draw_bar_plot, normalize_min_max, vertical_projection},
    },
    io::{functional as F, FilePresenter, ImagePresenter},
};

const PLOT_HEIGHT: usize = 256;

#[derive(FromArgs)]
/// Equalize the histogram of an image and plot its intensity projections
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory to write the results to
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let image = F::read_image_any_rgb8(&args.image_path)?;
    log::info!("loaded {} with size {}", args.image_path.display(), image.size());

    let mut presenter = FilePresenter::new(&args.output_dir)?;
    presenter.present_rgb8("Original Image", &image)?;

    // compute and plot the histogram per channel
    for (channel, name) in image.split_channels()?.iter().zip(["red", "green", "blue"]) {
        let mut hist = vec![0; 256];
        compute_histogram(channel, &mut hist, 256)?;

        let counts = hist.iter().map(|&v| v as f32).collect::<Vec<_>>();
        let plot = draw_bar_plot(&normalize_min_max(&counts, 0.0, 255.0), PLOT_HEIGHT)?;
        presenter.present_gray8(&format!("Histogram {name}"), &plot)?;
    }

    // equalize every channel independently
    let equalized = equalize_histogram_rgb(&image)?;
    presenter.present_rgb8("Equalized Image", &equalized)?;

    let mut gray = Image::from_size_val(image.size(), 0u8)?;
    gray_from_rgb_u8(&image, &mut gray)?;

    // sum of the intensities of every column
    let projection = normalize_min_max(&vertical_projection(&gray), 0.0, 255.0);
    let projection_plot = draw_bar_plot(&projection, PLOT_HEIGHT)?;
    presenter.present_gray8("Vertical Projection", &projection_plot)?;

    // intensities along the central row
    let profile_plot = draw_bar_plot(&center_row_profile(&gray)?, PLOT_HEIGHT)?;
    presenter.present_gray8("Image Profile", &profile_plot)?;

    log::info!(
        "wrote {} images to {}",
        presenter.count(),
        presenter.output_dir().display()
    );

    Ok(())
}
