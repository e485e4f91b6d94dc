use lowpass_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Padding of `size` pixels on all four sides.
    pub fn uniform(size: usize) -> Self {
        Self {
            top: size,
            bottom: size,
            left: size,
            right: size,
        }
    }

    /// The size of an image of `size` after applying this padding.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }

    /// Validates that a new image size correctly matches the expected dimensions
    /// after applying this padding to an existing image.
    ///
    /// # Example
    /// ```rust
    /// use lowpass_image::ImageSize;
    /// use lowpass_imgproc::padding::Padding2D;
    /// let padding = Padding2D { top: 1, bottom: 1, left: 2, right: 2 };
    /// let old_size = ImageSize { width: 4, height: 4 };
    /// let new_size = ImageSize { width: 8, height: 6 };
    ///
    /// assert!(padding.validate_size(old_size, new_size));
    /// ```
    pub fn validate_size(&self, old_size: ImageSize, new_size: ImageSize) -> bool {
        self.padded_size(old_size) == new_size
    }
}

/// Copies `src` into the center of `dst` and fills the border with a constant value.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `constant_value` - The pixel value used for the border, one value per channel.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match with the expected size
/// i.e. after applying padding specified in argument `padding` on `src`.
///
/// # Example
///
/// ```rust
/// use lowpass_image::{Image, ImageSize};
/// use lowpass_imgproc::padding::{spatial_padding, Padding2D};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![1u8; 4]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 9).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::uniform(1), [0u8]).unwrap();
///
/// assert_eq!(dst.as_slice()[0], 0);
/// assert_eq!(dst.as_slice()[5], 1);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if !padding.validate_size(src.size(), dst.size()) {
        let expected = padding.padded_size(src.size());
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let old_stride = src.width() * C;
    let new_stride = dst.width() * C;
    let left = padding.left * C;

    let new_data = dst.as_slice_mut();
    new_data
        .chunks_exact_mut(C)
        .for_each(|chunk| chunk.copy_from_slice(&constant_value));

    // nothing to copy for images without samples
    if old_stride == 0 {
        return Ok(());
    }

    // copy old image data as center of new image data
    new_data
        .par_chunks_exact_mut(new_stride)
        .skip(padding.top)
        .zip(src.as_slice().par_chunks_exact(old_stride))
        .for_each(|(dst_row, src_row)| {
            dst_row[left..left + old_stride].copy_from_slice(src_row);
        });

    Ok(())
}

/// Surround a single channel image with a zero border of `size` pixels on every side.
///
/// A `size` of zero returns a copy of the source image.
///
/// # Example
///
/// ```rust
/// use lowpass_image::{Image, ImageSize};
/// use lowpass_imgproc::padding::zero_padding;
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 1, height: 1 }, vec![5]).unwrap();
/// let padded = zero_padding(&src, 1).unwrap();
///
/// assert_eq!(padded.as_slice(), &[0, 0, 0, 0, 5, 0, 0, 0, 0]);
/// ```
pub fn zero_padding(src: &Image<u8, 1>, size: usize) -> Result<Image<u8, 1>, ImageError> {
    let padding = Padding2D::uniform(size);
    let mut dst = Image::from_size_val(padding.padded_size(src.size()), 0u8)?;
    spatial_padding(src, &mut dst, padding, [0u8])?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding_3x2() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let src = Image::<u8, 1>::new(
            ImageSize { width: 3, height: 2 },
            vec![
                1, 2, 3,
                4, 5, 6,
            ],
        )?;

        let padded = zero_padding(&src, 1)?;

        assert_eq!(padded.size(), ImageSize { width: 5, height: 4 });
        #[rustfmt::skip]
        assert_eq!(
            padded.as_slice(),
            &[
                0, 0, 0, 0, 0,
                0, 1, 2, 3, 0,
                0, 4, 5, 6, 0,
                0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_zero_padding_identity() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![1, 2, 3, 4])?;
        let padded = zero_padding(&src, 0)?;
        assert_eq!(padded, src);
        Ok(())
    }

    #[test]
    fn test_zero_padding_empty_source() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(ImageSize { width: 0, height: 0 }, vec![])?;
        let padded = zero_padding(&src, 2)?;
        assert_eq!(padded.size(), ImageSize { width: 4, height: 4 });
        assert!(padded.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_spatial_padding_asymmetric_rgb() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new(ImageSize { width: 1, height: 1 }, vec![1, 2, 3])?;
        let padding = Padding2D {
            top: 0,
            bottom: 1,
            left: 1,
            right: 0,
        };
        let mut dst = Image::<u8, 3>::from_size_val(ImageSize { width: 2, height: 2 }, 0)?;
        spatial_padding(&src, &mut dst, padding, [9, 9, 9])?;
        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                9, 9, 9, 1, 2, 3,
                9, 9, 9, 9, 9, 9,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_spatial_padding_size_mismatch() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 2 }, vec![0; 4])?;
        let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 4 }, 0)?;
        let res = spatial_padding(&src, &mut dst, Padding2D::uniform(1), [0]);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 4, 4, 4)));
        Ok(())
    }
}
