#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use lowpass_image as image;

#[doc(inline)]
pub use lowpass_imgproc as imgproc;

#[doc(inline)]
pub use lowpass_dist as dist;

#[doc(inline)]
pub use lowpass_io as io;
