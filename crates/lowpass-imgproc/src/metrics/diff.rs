use lowpass_image::{Image, ImageError};

/// Compute the per-sample absolute difference `|image1 - image2|`.
///
/// # Arguments
///
/// * `image1` - The first input image with shape (H, W, C).
/// * `image2` - The second input image with shape (H, W, C).
/// * `dst` - The output image with shape (H, W, C).
pub fn abs_diff<const C: usize>(
    image1: &Image<u8, C>,
    image2: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    for other in [image2.size(), dst.size()] {
        if image1.size() != other {
            return Err(ImageError::InvalidImageSize(
                image1.cols(),
                image1.rows(),
                other.width,
                other.height,
            ));
        }
    }

    dst.as_slice_mut()
        .iter_mut()
        .zip(image1.as_slice().iter().zip(image2.as_slice().iter()))
        .for_each(|(out, (&a, &b))| *out = a.abs_diff(b));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_diff() -> Result<(), ImageError> {
        let image1 = Image::<u8, 1>::new([3, 1].into(), vec![0, 10, 255])?;
        let image2 = Image::<u8, 1>::new([3, 1].into(), vec![5, 10, 0])?;
        let mut dst = Image::<u8, 1>::from_size_val([3, 1].into(), 0)?;
        abs_diff(&image1, &image2, &mut dst)?;
        assert_eq!(dst.as_slice(), &[5, 0, 255]);
        Ok(())
    }
}
