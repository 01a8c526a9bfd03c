//! The external decoding collaborator and the frame-loading entry points.
//!
//! Decoding is not done here: a [`DecodeEngine`] implementation wraps one
//! opened source and produces pixel payloads and raw property dictionaries
//! on demand. [`load_frame`] and [`load_image`] turn those into the crate's
//! [`Frame`] and [`Image`] records.

use serde_json::Value;

use super::types::{DecodedImage, FrameLoadError, LoadingMethod, Orientation, PixelSource};
use crate::frame::{normalize_metadata, AnimatedFormat, Frame, Image};

/// The decoding half of the external decoding/rendering collaborator, bound
/// to one opened source.
///
/// Only [`decode_frame`] can fail; every metadata accessor is best-effort
/// and reports absence with `None`.
///
/// [`decode_frame`]: DecodeEngine::decode_frame
pub trait DecodeEngine {
    /// Number of frames in the source.
    fn frame_count(&self) -> usize;

    /// Decode the pixel payload of the frame at `index` using the given
    /// loading method.
    fn decode_frame(
        &self,
        index: usize,
        method: LoadingMethod,
    ) -> Result<PixelSource, FrameLoadError>;

    /// Copy the raw property dictionary of the frame at `index`, if the
    /// source carries one.
    fn raw_metadata(&self, index: usize) -> Option<Value>;

    /// Load the auxiliary HDR gain map for the frame at `index`.
    ///
    /// Gain map support is platform- and version-gated in practice; absence
    /// is normal, not an error.
    fn gain_map(&self, index: usize) -> Option<DecodedImage> {
        let _ = index;
        None
    }

    /// Container-level properties, if the source carries any.
    fn container_info(&self) -> Option<Value> {
        None
    }

    /// EXIF orientation of the source.
    ///
    /// The default reads the standard `Orientation` property (1-8) from
    /// [`container_info`], falling back to normal when absent or malformed,
    /// like every other metadata lookup. Engines with a cheaper path may
    /// override.
    ///
    /// [`container_info`]: DecodeEngine::container_info
    fn orientation(&self) -> Orientation {
        self.container_info()
            .and_then(|info| info.get("Orientation")?.as_u64())
            .map_or(Orientation::Normal, |raw| Orientation::from(raw as u32))
    }

    /// The source's animated container format, when recognized.
    fn format(&self) -> Option<AnimatedFormat> {
        None
    }

    /// Whether the source carries alpha.
    fn has_alpha(&self) -> bool {
        false
    }

    /// Index of the primary (cover) frame.
    fn primary_index(&self) -> usize {
        0
    }
}

/// Load one frame from a source.
///
/// Decode failures propagate as [`FrameLoadError::FailedToReadImage`].
/// Animation metadata is normalized only when `animated` is true; static
/// sources skip extraction entirely and leave every animation field absent.
pub fn load_frame(
    engine: &dyn DecodeEngine,
    index: usize,
    method: LoadingMethod,
    animated: bool,
) -> Result<Frame, FrameLoadError> {
    let payload = engine.decode_frame(index, method)?;

    let mut frame = Frame::from_payload(payload);
    frame.should_resize = method.is_full_resolution();
    if animated {
        if let Some(raw) = engine.raw_metadata(index) {
            frame.apply_metadata(normalize_metadata(&raw));
        }
    }
    frame.gain_map = engine.gain_map(index);

    Ok(frame)
}

/// Load every frame of a source into an [`Image`] aggregate.
///
/// The first decode failure aborts the load; no retry happens here.
pub fn load_image(engine: &dyn DecodeEngine, method: LoadingMethod) -> Result<Image, FrameLoadError> {
    let count = engine.frame_count();
    let animated = count > 1;

    let mut frames = Vec::with_capacity(count);
    for index in 0..count {
        frames.push(load_frame(engine, index, method, animated)?);
    }

    let primary_index = engine.primary_index().min(count.saturating_sub(1));
    let primary_properties = engine.raw_metadata(primary_index);
    let orientation = engine.orientation();

    // The aggregate size is the primary frame's extent as displayed, so a
    // 90/270-degree orientation swaps it.
    let (w, h) = frames.get(primary_index).map_or((0, 0), Frame::size);
    let size = if orientation.swaps_dimensions() {
        (h, w)
    } else {
        (w, h)
    };

    Ok(Image {
        frames,
        info: engine.container_info(),
        format: engine.format(),
        size,
        primary_properties,
        primary_index,
        orientation,
        has_alpha: engine.has_alpha(),
        processing_method: method,
    })
}
