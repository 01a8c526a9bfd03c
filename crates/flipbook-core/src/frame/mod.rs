//! Decoded frames and the image aggregate.
//!
//! A [`Frame`] is one decoded raster image plus its animation timing
//! metadata; an [`Image`] is the ordered frame sequence produced by a full
//! decode (length 1 for static images) together with decode-time descriptive
//! metadata.
//!
//! All types here are immutable value records. The only owned resources are
//! a frame's pixel payload and its optional gain map; both are released when
//! the frame is dropped (notably when the rate adapter discards a frame).

mod metadata;
mod timing;

pub use metadata::{normalize_metadata, AnimatedFormat, FrameMetadata, MIN_FRAME_DELAY};
pub use timing::{adapt_frame_rate, total_duration, AdaptedSequence, MAX_ADAPTED_DELAY};

use crate::decode::{DecodedImage, FilterGraphImage, LoadingMethod, Orientation, PixelSource};

/// One decoded image plus its animation metadata.
///
/// The pixel payload is private so that construction goes through
/// [`Frame::from_payload`] and the payload stays a single [`PixelSource`];
/// a frame never holds both rendering-engine representations.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    payload: Option<PixelSource>,
    /// Auxiliary HDR gain map, geometrically aligned to the primary payload's
    /// top-left origin, typically at lower resolution.
    pub gain_map: Option<DecodedImage>,
    /// The frame was decoded at full resolution and is eligible for later
    /// downscaling.
    pub should_resize: bool,
    /// Inter-frame delay in seconds, clamped to the 0.1 s codec minimum.
    pub delay_time: Option<f64>,
    /// True intended inter-frame delay in seconds, without the 0.1 s floor.
    pub unclamped_delay_time: Option<f64>,
    /// Repeats of the whole sequence; 0 conventionally means infinite.
    pub loop_count: Option<u32>,
    /// Logical animation canvas width; may exceed this frame's own bounds.
    pub canvas_width: Option<u32>,
    /// Logical animation canvas height; may exceed this frame's own bounds.
    pub canvas_height: Option<u32>,
    /// Raw per-frame codec metadata, opaque passthrough.
    pub frame_info: Option<serde_json::Value>,
}

impl Frame {
    /// Create a frame holding the given pixel payload and no animation
    /// metadata.
    pub fn from_payload(payload: PixelSource) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }

    /// Create a frame from a decoded bitmap.
    pub fn from_bitmap(bitmap: DecodedImage) -> Self {
        Self::from_payload(PixelSource::Bitmap(bitmap))
    }

    /// Create a frame from a filter-graph image.
    pub fn from_graph(graph: FilterGraphImage) -> Self {
        Self::from_payload(PixelSource::Graph(graph))
    }

    /// The frame's pixel payload, if any.
    pub fn payload(&self) -> Option<&PixelSource> {
        self.payload.as_ref()
    }

    /// Consume the frame, returning its payload and gain map.
    pub fn into_payload(self) -> (Option<PixelSource>, Option<DecodedImage>) {
        (self.payload, self.gain_map)
    }

    /// Take the payload and gain map out, leaving the metadata in place.
    pub fn take_payload(&mut self) -> (Option<PixelSource>, Option<DecodedImage>) {
        (self.payload.take(), self.gain_map.take())
    }

    /// Replace the pixel payload and gain map, keeping all metadata.
    ///
    /// Used by the transform pipeline to thread a rendering engine's output
    /// back into the frame.
    pub fn with_payload(
        mut self,
        payload: PixelSource,
        gain_map: Option<DecodedImage>,
    ) -> Self {
        self.payload = Some(payload);
        self.gain_map = gain_map;
        self
    }

    /// Frame extent as (width, height), derived from whichever payload
    /// representation is present. Zero extent if neither is.
    pub fn size(&self) -> (u32, u32) {
        self.payload.as_ref().map_or((0, 0), PixelSource::size)
    }

    /// Scale factor of the gain map relative to the primary payload, derived
    /// as `gain_map.width / primary.width`. Never stored.
    ///
    /// `None` unless both a payload and a gain map are present and the
    /// primary has nonzero width.
    pub fn gain_map_scale(&self) -> Option<f64> {
        let primary = self.payload.as_ref()?;
        let gain = self.gain_map.as_ref()?;
        if primary.width() == 0 {
            return None;
        }
        Some(gain.width as f64 / primary.width() as f64)
    }

    /// Copy the unified animation metadata fields from a normalized record.
    pub fn apply_metadata(&mut self, meta: FrameMetadata) {
        self.delay_time = meta.delay_time;
        self.unclamped_delay_time = meta.unclamped_delay_time;
        self.loop_count = meta.loop_count;
        self.canvas_width = meta.canvas_width;
        self.canvas_height = meta.canvas_height;
        self.frame_info = meta.frame_info;
    }
}

/// Aggregate result of a full decode.
///
/// All fields besides `frames` are decode-time descriptive metadata, opaque
/// to the transform logic.
#[derive(Debug, Clone, Default)]
pub struct Image {
    /// Ordered frame sequence; insertion order is decode/display order.
    pub frames: Vec<Frame>,
    /// Container-level properties as reported by the decoding engine.
    pub info: Option<serde_json::Value>,
    /// Animated container format, when the source is one of the recognized
    /// animated codecs.
    pub format: Option<AnimatedFormat>,
    /// Pixel size of the primary frame as (width, height).
    pub size: (u32, u32),
    /// Raw properties of the primary frame.
    pub primary_properties: Option<serde_json::Value>,
    /// Index of the primary (cover) frame.
    pub primary_index: usize,
    /// EXIF orientation reported for the source; already baked into `size`.
    pub orientation: Orientation,
    /// Whether any frame carries alpha.
    pub has_alpha: bool,
    /// Loading method the frames were decoded with.
    pub processing_method: LoadingMethod,
}

impl Image {
    /// Whether this image is an animated sequence.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// The primary (cover) frame, if the index is valid.
    pub fn primary_frame(&self) -> Option<&Frame> {
        self.frames.get(self.primary_index)
    }
}
