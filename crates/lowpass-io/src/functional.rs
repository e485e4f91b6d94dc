use std::path::Path;

use lowpass_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit grayscale.
///
/// The method reads from any image format supported by the image crate and converts the
/// samples to luma.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A single channel image with the size of the file's image.
pub fn read_image_mono8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

/// Writes an 8-bit grayscale image to the given file path.
///
/// The format is chosen from the file extension.
///
/// # Arguments
///
/// * `file_path` - The path to the output image, e.g. `filtered.png`.
/// * `image` - The image to write.
pub fn write_image_mono8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    let file_path = file_path.as_ref().to_owned();

    if file_path.extension().is_none() {
        return Err(IoError::InvalidFileExtension(file_path));
    }

    let (width, height) = match (u32::try_from(image.width()), u32::try_from(image.height())) {
        (Ok(width), Ok(height)) => (width, height),
        _ => return Err(IoError::InvalidImageSize(image.width(), image.height())),
    };

    let buffer = image::GrayImage::from_raw(width, height, image.as_slice().to_vec())
        .ok_or(IoError::InvalidImageSize(image.width(), image.height()))?;
    buffer.save(&file_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_write_mono8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let size = ImageSize {
            width: 16,
            height: 9,
        };
        let image = Image::<u8, 1>::new(
            size,
            (0..size.width * size.height).map(|i| (i * 7 % 256) as u8).collect(),
        )?;
        write_image_mono8(&file_path, &image)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_mono8(&file_path)?;
        assert_eq!(image_back.size(), size);
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let result = read_image_mono8("does/not/exist.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn write_without_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let file_path = tmp_dir.path().join("image");
        match write_image_mono8(&file_path, &image) {
            Err(err @ IoError::InvalidFileExtension(_)) => assert_eq!(
                err.to_string(),
                format!("File does not have a valid extension: {}", file_path.display())
            ),
            other => panic!("expected an invalid extension error, got {other:?}"),
        }
        Ok(())
    }
}
