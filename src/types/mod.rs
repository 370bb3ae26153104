//! Types
//!
//! `firefly` holds the remote wire format, `image` the host-facing call types.

pub mod firefly;
pub mod image;

pub use firefly::*;
pub use image::*;
