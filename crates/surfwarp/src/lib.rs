#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use surfwarp_image as image;

#[doc(inline)]
pub use surfwarp_imgproc as imgproc;

#[doc(inline)]
pub use surfwarp_io as io;
