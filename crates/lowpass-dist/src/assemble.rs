use lowpass_image::{Image, ImageSize};
use lowpass_imgproc::crop::crop_image;

use crate::error::DistError;

/// Remove the padding border from the gathered image.
///
/// # Arguments
///
/// * `gathered` - The filtered image with the padding border, as gathered at the root.
/// * `original` - The size of the image before padding.
/// * `half` - The padding width on each side.
///
/// # Returns
///
/// The filtered image with the size of the original image.
///
/// # Errors
///
/// Fails if `gathered` is not the original size grown by `half` on every side.
pub fn assemble(
    gathered: &Image<u8, 1>,
    original: ImageSize,
    half: usize,
) -> Result<Image<u8, 1>, DistError> {
    let expected_width = original.width + 2 * half;
    let expected_height = original.height + 2 * half;
    if gathered.width() != expected_width || gathered.height() != expected_height {
        return Err(DistError::PlanMismatch {
            rows: expected_height,
            width: expected_width,
            actual_rows: gathered.height(),
            actual_width: gathered.width(),
        });
    }

    let mut output = Image::from_size_val(original, 0u8)?;
    crop_image(gathered, &mut output, half, half)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_crops_border() -> Result<(), DistError> {
        let gathered = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            vec![
                0, 0, 0, 0, //
                0, 1, 2, 0, //
                0, 3, 4, 0, //
                0, 0, 0, 0,
            ],
        )?;
        let original = ImageSize {
            width: 2,
            height: 2,
        };
        let output = assemble(&gathered, original, 1)?;
        assert_eq!(output.size(), original);
        assert_eq!(output.as_slice(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_assemble_without_border() -> Result<(), DistError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let gathered = Image::<u8, 1>::new(size, vec![1, 2, 3, 4, 5, 6])?;
        assert_eq!(assemble(&gathered, size, 0)?, gathered);
        Ok(())
    }

    #[test]
    fn test_assemble_size_mismatch() -> Result<(), DistError> {
        let gathered = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            0,
        )?;
        let original = ImageSize {
            width: 3,
            height: 3,
        };
        assert_eq!(
            assemble(&gathered, original, 1),
            Err(DistError::PlanMismatch {
                rows: 5,
                width: 5,
                actual_rows: 4,
                actual_width: 5,
            })
        );
        Ok(())
    }
}
