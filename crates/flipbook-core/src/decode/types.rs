//! Core types for frame decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when the decoding engine cannot produce a pixel payload.
///
/// This is the only error that propagates out of frame loading; all metadata
/// extraction is best-effort and resolves missing data to `None` instead.
#[derive(Debug, Error)]
pub enum FrameLoadError {
    /// The decoding engine could not read a frame at the requested index
    /// with the requested loading method.
    #[error("Failed to read image frame {index}")]
    FailedToReadImage {
        /// Frame index that could not be decoded.
        index: usize,
    },
}

/// How a frame's pixel payload should be materialized by the decoding engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingMethod {
    /// Fully decoded bitmap at the source's native resolution.
    #[default]
    FullImage,
    /// Full-resolution image as a lazily evaluated filter-graph node.
    FilterGraph,
    /// Downscaled bitmap whose longest edge fits `max_pixel_size`.
    Thumbnail {
        /// Maximum length of the longest edge in pixels.
        max_pixel_size: u32,
    },
}

impl LoadingMethod {
    /// Whether this method decodes at full resolution, leaving the frame
    /// eligible for later downscaling (`Frame::should_resize`).
    pub fn is_full_resolution(self) -> bool {
        matches!(self, LoadingMethod::FullImage | LoadingMethod::FilterGraph)
    }
}

/// EXIF orientation values (1-8), threaded to the rendering engine as a hint
/// alongside each applied operation.
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded bitmap with RGBA pixel data.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height * 4) as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

/// A full-resolution image represented as a node in the rendering engine's
/// lazily evaluated filter graph.
///
/// The pixel data lives inside the engine; this handle only carries the
/// extent and the engine-assigned node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterGraphImage {
    /// Extent width in pixels.
    pub width: u32,
    /// Extent height in pixels.
    pub height: u32,
    /// Engine-assigned node handle.
    pub node: u64,
}

/// A frame's pixel payload: exactly one of the two rendering-engine
/// representations.
///
/// A frame never holds both a decoded bitmap and a filter-graph image; the
/// enum makes the "at most one populated" invariant unrepresentable rather
/// than checked.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelSource {
    /// Fully decoded bitmap.
    Bitmap(DecodedImage),
    /// Lazily evaluated filter-graph image.
    Graph(FilterGraphImage),
}

impl PixelSource {
    /// Payload width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            PixelSource::Bitmap(img) => img.width,
            PixelSource::Graph(img) => img.width,
        }
    }

    /// Payload height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            PixelSource::Bitmap(img) => img.height,
            PixelSource::Graph(img) => img.height,
        }
    }

    /// Payload extent as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}
