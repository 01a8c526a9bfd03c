//! Flipbook Core - Animated raster image model
//!
//! This crate models decoded still and animated images and the geometric
//! transforms applied to them before re-encoding:
//!
//! - unified per-frame animation metadata across the GIF, HEIC-sequence,
//!   WebP, and animated-PNG containers ([`frame`]);
//! - total-duration calculation and frame-rate adaptation that thins a
//!   sequence while preserving playback duration ([`total_duration`],
//!   [`adapt_frame_rate`]);
//! - a closed set of geometric operations and output sizing intents with a
//!   deterministic application order, rescalable in lockstep for HDR
//!   gain-map auxiliaries ([`transform`]);
//! - the integration boundary to the external decoding/rendering engine
//!   ([`decode`]).
//!
//! Pixel-level work (decoding, resampling, rotation math) belongs to the
//! external engine; everything in this crate is pure, immutable value
//! modeling that concurrent readers can share freely.

pub mod decode;
pub mod frame;
pub mod transform;

pub use decode::{
    load_frame, load_image, DecodeEngine, DecodedImage, FilterGraphImage, FrameLoadError,
    LoadingMethod, Orientation, PixelSource,
};
pub use frame::{
    adapt_frame_rate, normalize_metadata, total_duration, AdaptedSequence, AnimatedFormat, Frame,
    FrameMetadata, Image,
};
pub use transform::{
    apply_operations, Bounds, CropAnchor, CropOptions, CustomTransform, FillPolicy, Operation,
    OperationSet, RenderEngine, SizeIntent,
};
