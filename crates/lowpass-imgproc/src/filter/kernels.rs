use lowpass_image::ImageDtype;

use super::FilterError;

/// The side length of a square filter kernel.
///
/// Always a positive odd number, so that the kernel has a well defined center.
///
/// # Example
///
/// ```
/// use lowpass_imgproc::filter::kernels::KernelSize;
///
/// let size = KernelSize::new(5).unwrap();
/// assert_eq!(size.get(), 5);
/// assert_eq!(size.half(), 2);
/// assert!(KernelSize::new(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSize(usize);

impl KernelSize {
    /// Create a kernel size, rejecting zero and even sizes.
    pub fn new(size: usize) -> Result<Self, FilterError> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernelSize(size));
        }
        Ok(Self(size))
    }

    /// The side length of the kernel.
    pub fn get(&self) -> usize {
        self.0
    }

    /// The kernel radius, i.e. the border width needed around an image.
    pub fn half(&self) -> usize {
        self.0 / 2
    }
}

impl TryFrom<usize> for KernelSize {
    type Error = FilterError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl std::fmt::Display for KernelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// The uniform weight of a box kernel, `1 / kernel_size^2`.
pub fn box_weight(kernel_size: KernelSize) -> f32 {
    1.0 / (kernel_size.get() * kernel_size.get()) as f32
}

/// Compute the box filter response centered at column `col`.
///
/// `rows` holds the kernel rows from top to bottom, each one a full image row. The
/// neighborhood is visited row by row and column by column, accumulating
/// `sample * weight` in `f32`, and the sum is rounded to the nearest sample value.
///
/// PRECONDITION: `half <= col` and `col + half < row.len()` for every row.
///
/// # Example
///
/// ```
/// use lowpass_imgproc::filter::kernels::box_response;
///
/// let rows: [&[u8]; 3] = [&[9, 9, 9], &[9, 9, 9], &[0, 0, 0]];
/// assert_eq!(box_response(&rows, 1, 1, 1.0 / 9.0), 6);
/// ```
#[inline]
pub fn box_response(rows: &[&[u8]], col: usize, half: usize, weight: f32) -> u8 {
    let mut sum = 0.0f32;
    for row in rows {
        for &sample in &row[col - half..=col + half] {
            sum += sample as f32 * weight;
        }
    }
    u8::from_f32(sum)
}
