use argh::FromArgs;
use std::path::PathBuf;

use lensfx::{
    image::{Image, ImageSize},
    imgproc::{
        interpolation::InterpolationMode,
        warp::{
            get_affine_transform, get_perspective_transform, get_rotation_matrix2d, warp_affine,
            warp_perspective,
        },
    },
    io::{functional as F, FilePresenter, ImagePresenter},
};

#[derive(FromArgs)]
/// Apply a set of geometric transformations to an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory to write the results to
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// the scale factor of the scaling step
    #[argh(option, default = "1.5")]
    scale: f32,

    /// the rotation angle in degrees
    #[argh(option, default = "30.0")]
    angle: f32,
}

fn affine(
    image: &Image<u8, 3>,
    size: ImageSize,
    m: &[f32; 6],
) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let mut dst = Image::from_size_val(size, 0u8)?;
    warp_affine(image, &mut dst, m, InterpolationMode::Bilinear)?;
    Ok(dst)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let image = F::read_image_any_rgb8(&args.image_path)?;
    log::info!("loaded {} with size {}", args.image_path.display(), image.size());

    let mut presenter = FilePresenter::new(&args.output_dir)?;
    presenter.present_rgb8("Original Image", &image)?;

    let (cols, rows) = (image.cols() as f32, image.rows() as f32);

    // shift
    let shifted = affine(&image, image.size(), &[1.0, 0.0, 50.0, 0.0, 1.0, 100.0])?;
    presenter.present_rgb8("Shifted Image", &shifted)?;

    // reflection about the x axis
    let reflected = affine(&image, image.size(), &[1.0, 0.0, 0.0, 0.0, -1.0, rows - 1.0])?;
    presenter.present_rgb8("Reflected Image", &reflected)?;

    // scaling into a canvas large enough to hold the result
    let scaled_size = ImageSize {
        width: (cols * args.scale) as usize,
        height: (rows * args.scale) as usize,
    };
    let s = args.scale;
    let scaled = affine(&image, scaled_size, &[s, 0.0, 0.0, 0.0, s, 0.0])?;
    presenter.present_rgb8("Scaled Image", &scaled)?;

    // rotation about the image center
    let rotation = get_rotation_matrix2d((cols / 2.0, rows / 2.0), args.angle, 1.0);
    let rotated = affine(&image, image.size(), &rotation)?;
    presenter.present_rgb8("Rotated Image", &rotated)?;

    // three point affine transform
    let src_tri = [(0.0, 0.0), (cols - 1.0, 0.0), (0.0, rows - 1.0)];
    let dst_tri = [
        (0.0, rows * 0.33),
        (cols * 0.85, rows * 0.25),
        (cols * 0.15, rows * 0.7),
    ];
    let m = get_affine_transform(&src_tri, &dst_tri)?;
    log::debug!("affine matrix: {:?}", m);
    let affine_transformed = affine(&image, image.size(), &m)?;
    presenter.present_rgb8("Affine Transformed Image", &affine_transformed)?;

    // four point projective transform
    let src_quad = [
        (0.0, 0.0),
        (cols - 1.0, 0.0),
        (cols - 1.0, rows - 1.0),
        (0.0, rows - 1.0),
    ];
    let dst_quad = [
        (cols * 0.05, rows * 0.33),
        (cols * 0.9, rows * 0.2),
        (cols * 0.8, rows * 0.9),
        (cols * 0.2, rows * 0.7),
    ];
    let m = get_perspective_transform(&src_quad, &dst_quad)?;
    log::debug!("perspective matrix: {:?}", m);
    let mut projective = Image::from_size_val(image.size(), 0u8)?;
    warp_perspective(&image, &mut projective, &m, InterpolationMode::Bilinear)?;
    presenter.present_rgb8("Projective Transformed Image", &projective)?;

    Ok(())
}
