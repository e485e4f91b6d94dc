use lowpass_image::{Image, ImageDtype, ImageError};

/// Compute the mean squared error (MSE) between two images.
///
/// The MSE is defined as:
///
/// $ MSE = \frac{1}{n} \sum_{i=1}^{n} (I_1 - I_2)^2 $
///
/// where `I_1` and `I_2` are the two images and `n` is the number of samples.
/// Two empty images have an MSE of zero.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use lowpass_image::{Image, ImageSize};
/// use lowpass_imgproc::metrics::mse;
///
/// let image1 = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![0, 4]).unwrap();
/// let image2 = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![2, 4]).unwrap();
///
/// assert_eq!(mse(&image1, &image2).unwrap(), 2.0);
/// ```
pub fn mse<T: ImageDtype, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
) -> Result<f32, ImageError> {
    if image1.size() != image2.size() {
        return Err(ImageError::InvalidImageSize(
            image1.cols(),
            image1.rows(),
            image2.cols(),
            image2.rows(),
        ));
    }

    if image1.numel() == 0 {
        return Ok(0.0);
    }

    let sum = image1
        .as_slice()
        .iter()
        .zip(image2.as_slice().iter())
        .map(|(&a, &b)| {
            let (a, b): (f32, f32) = (a.into(), b.into());
            (a - b) * (a - b)
        })
        .sum::<f32>();

    Ok(sum / (image1.numel() as f32))
}

/// Compute the peak signal-to-noise ratio (PSNR) between two images.
///
/// The PSNR is defined as:
///
/// $ PSNR = 20 \log_{10} \left( \frac{MAX}{\sqrt{MSE}} \right) $
///
/// where `MAX` is the maximum possible sample value and `MSE` is the mean squared error.
/// Identical images have an infinite PSNR.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `max_value` - The maximum possible sample value, e.g. 255 for 8-bit images.
pub fn psnr<T: ImageDtype, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    max_value: f32,
) -> Result<f32, ImageError> {
    let mse = mse(image1, image2)?;
    if mse == 0.0 {
        return Ok(f32::INFINITY);
    }
    Ok(20.0 * (max_value / mse.sqrt()).log10())
}
