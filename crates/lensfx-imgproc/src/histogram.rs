use lensfx_image::{Image, ImageError};
use rayon::prelude::*;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram, the counts are accumulated into it.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let mut bin_lut = [0usize; 256];
    for (i, bin) in bin_lut.iter_mut().enumerate() {
        *bin = (i * num_bins) >> 8;
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[bin_lut[px as usize]] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                a.iter_mut().zip(b.iter()).for_each(|(a, b)| *a += b);
                a
            },
        );

    hist.iter_mut()
        .zip(counts.iter())
        .for_each(|(h, c)| *h += c);

    Ok(())
}

/// Build the lookup table that equalizes a 256-bin histogram.
///
/// The first non-empty bin maps to zero and the cumulative distribution of the remaining bins
/// is stretched to `[0, 255]`. A histogram with a single non-empty bin maps it to itself.
fn equalization_lut(hist: &[usize; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];

    let total: usize = hist.iter().sum();
    let Some(first) = hist.iter().position(|&count| count > 0) else {
        return lut;
    };

    if hist[first] == total {
        lut.iter_mut().for_each(|v| *v = first as u8);
        return lut;
    }

    let scale = 255.0 / (total - hist[first]) as f32;
    let mut sum = 0usize;
    for i in first + 1..256 {
        sum += hist[i];
        lut[i] = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }

    lut
}

/// Equalize the histogram of a grayscale image.
///
/// # Arguments
///
/// * `src` - The input 8-bit grayscale image.
/// * `dst` - The output equalized image with the same size.
///
/// # Errors
///
/// Returns an error if the source and destination sizes do not match.
///
/// # Example
///
/// ```
/// use lensfx_image::{Image, ImageSize};
/// use lensfx_imgproc::histogram::equalize_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 1,
///   },
///   vec![10, 10, 20, 30],
/// ).unwrap();
///
/// let mut equalized = Image::from_size_val(image.size(), 0u8).unwrap();
/// equalize_histogram(&image, &mut equalized).unwrap();
///
/// assert_eq!(equalized.as_slice(), &[0, 0, 128, 255]);
/// ```
pub fn equalize_histogram(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut hist = [0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let lut = equalization_lut(&hist);

    dst.as_slice_mut()
        .par_iter_mut()
        .zip(src.as_slice().par_iter())
        .for_each(|(d, &s)| *d = lut[s as usize]);

    Ok(())
}

/// Equalize every channel of a color image independently.
///
/// # Arguments
///
/// * `src` - The input 8-bit color image.
///
/// # Returns
///
/// A new image where each channel has been equalized.
pub fn equalize_histogram_rgb(src: &Image<u8, 3>) -> Result<Image<u8, 3>, ImageError> {
    let channels = src
        .split_channels()?
        .iter()
        .map(|channel| {
            let mut equalized = Image::from_size_val(channel.size(), 0u8)?;
            equalize_histogram(channel, &mut equalized)?;
            Ok(equalized)
        })
        .collect::<Result<Vec<_>, ImageError>>()?;

    Image::from_channels(&channels)
}
