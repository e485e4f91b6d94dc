use lowpass_image::{Image, ImageError};

use super::kernels::{box_response, box_weight, KernelSize};
use super::FilterError;
use crate::padding::zero_padding;
use crate::parallel::{for_each_row, ExecutionStrategy};

/// Blur a single channel image with a normalized box filter on a single thread.
///
/// The image is zero padded by the kernel radius, so pixels close to the border average in
/// zeros from outside the image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `kernel_size` - The side length of the square kernel.
///
/// # Example
///
/// ```
/// use lowpass_image::{Image, ImageSize};
/// use lowpass_imgproc::filter::{box_blur, kernels::KernelSize};
///
/// let src = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 90).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// box_blur(&src, &mut dst, KernelSize::new(3).unwrap()).unwrap();
///
/// assert_eq!(dst.as_slice()[4], 90);
/// assert_eq!(dst.as_slice()[0], 40);
/// ```
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel_size: KernelSize,
) -> Result<(), FilterError> {
    box_blur_with(src, dst, kernel_size, ExecutionStrategy::Serial)
}

/// Blur a single channel image with a normalized box filter using the given strategy.
///
/// The output does not depend on the strategy: every pixel is computed with the same
/// arithmetic as [`box_blur`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 1).
/// * `kernel_size` - The side length of the square kernel.
/// * `strategy` - How the rows of the output are scheduled.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur_with(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel_size: KernelSize,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    let half = kernel_size.half();
    let weight = box_weight(kernel_size);

    let padded = zero_padding(src, half)?;
    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();

    let cols = dst.cols();
    for_each_row(dst.as_slice_mut(), cols, strategy, |y, dst_row| {
        // output row `y` sees padded rows `y..y + kernel_size`
        let rows = (y..=y + 2 * half)
            .map(|r| &padded_data[r * padded_cols..(r + 1) * padded_cols])
            .collect::<Vec<_>>();

        dst_row.iter_mut().enumerate().for_each(|(x, out)| {
            *out = box_response(&rows, x + half, half, weight);
        });
    })?;

    Ok(())
}
