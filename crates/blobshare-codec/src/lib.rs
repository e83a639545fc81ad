//! Blobshare share codec.
//!
//! Defines the fixed-size `Share` layout, field accessors, info and reserved
//! byte encodings, share building, and padding share constructors.

pub mod builder;
pub mod error;
pub mod info_byte;
pub mod padding;
pub mod reserved;
pub mod share;

pub use builder::ShareBuilder;
pub use error::{ShareError, ShareField};
pub use info_byte::InfoByte;
pub use share::{from_byte_buffers, to_byte_buffers, Share};
