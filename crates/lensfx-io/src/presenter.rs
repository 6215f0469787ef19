use std::path::{Path, PathBuf};

use lensfx_image::Image;

use crate::{
    error::IoError,
    functional::{write_image_png_gray8, write_image_png_rgb8},
};

/// A sink for the titled images produced by a processing pipeline.
///
/// Pipelines hand every intermediate result to a presenter instead of owning any display
/// state themselves.
pub trait ImagePresenter {
    /// Present an 8-bit RGB image under the given title.
    fn present_rgb8(&mut self, title: &str, image: &Image<u8, 3>) -> Result<(), IoError>;

    /// Present an 8-bit grayscale image under the given title.
    fn present_gray8(&mut self, title: &str, image: &Image<u8, 1>) -> Result<(), IoError>;
}

/// Presents images by writing them as numbered PNG files into a directory.
///
/// The file for the n-th presented image is named `NN_<slug>.png`, where `NN` is the zero-padded
/// call order starting at 1 and `slug` is the lowercased title with every run of
/// non-alphanumeric characters replaced by a single underscore.
///
/// # Example
///
/// ```no_run
/// use lensfx_image::Image;
/// use lensfx_io::{FilePresenter, ImagePresenter};
///
/// let mut presenter = FilePresenter::new("output").unwrap();
/// let image = Image::<u8, 1>::from_size_val([4, 4].into(), 0).unwrap();
///
/// // writes output/01_black_square.png
/// presenter.present_gray8("Black square", &image).unwrap();
/// ```
pub struct FilePresenter {
    output_dir: PathBuf,
    count: usize,
}

impl FilePresenter {
    /// Create a presenter writing into `output_dir`, creating the directory if needed.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, IoError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            count: 0,
        })
    }

    /// The directory the images are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The number of images presented so far.
    pub fn count(&self) -> usize {
        self.count
    }

    fn next_path(&mut self, title: &str) -> PathBuf {
        self.count += 1;
        self.output_dir
            .join(format!("{:02}_{}.png", self.count, slugify(title)))
    }
}

impl ImagePresenter for FilePresenter {
    fn present_rgb8(&mut self, title: &str, image: &Image<u8, 3>) -> Result<(), IoError> {
        let path = self.next_path(title);
        write_image_png_rgb8(&path, image)?;
        log::info!("{}: wrote {} ({})", title, path.display(), image.size());
        Ok(())
    }

    fn present_gray8(&mut self, title: &str, image: &Image<u8, 1>) -> Result<(), IoError> {
        let path = self.next_path(title);
        write_image_png_gray8(&path, image)?;
        log::info!("{}: wrote {} ({})", title, path.display(), image.size());
        Ok(())
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }

    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug.to_string()
    }
}
