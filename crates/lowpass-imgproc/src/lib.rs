#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// image filtering module.
pub mod filter;

/// image processing metrics module.
pub mod metrics;

/// image border padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;
