//! Frame decoding integration.
//!
//! This module does no pixel decoding itself. The [`DecodeEngine`] trait is
//! the boundary to the external decoding engine; [`load_frame`] and
//! [`load_image`] drive it to produce [`Frame`](crate::frame::Frame) and
//! [`Image`](crate::frame::Image) records, normalizing animation metadata
//! along the way.
//!
//! Decode failures surface immediately as
//! [`FrameLoadError::FailedToReadImage`]; retry is the surrounding
//! pipeline's responsibility.

mod engine;
mod types;

pub use engine::{load_frame, load_image, DecodeEngine};
pub use types::{
    DecodedImage, FilterGraphImage, FrameLoadError, LoadingMethod, Orientation, PixelSource,
};
