//! Filter operations
//!
//! This module provides the box (low-pass) filter and its building blocks.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

use crate::parallel::ParallelError;
use lowpass_image::ImageError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel size is not a positive odd number.
    #[error("kernel size must be a positive odd number, got {0}")]
    InvalidKernelSize(usize),

    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
