//! Image similarity metrics.
//!
//! Used to compare the outputs of different filtering methods.
//!
//! - **MSE** (Mean Squared Error): Average squared difference between samples
//! - **PSNR** (Peak Signal-to-Noise Ratio): Quality metric in dB scale
//! - **Absolute difference**: Per-sample difference image

mod diff;
mod mse;

pub use diff::abs_diff;
pub use mse::{mse, psnr};
