//! Output sizing and cropping intents.
//!
//! A [`SizeIntent`] describes the desired output framing of a transform
//! request: keep the original size, fit within bounds, or crop with an
//! alignment. Intents are plain values that the rendering engine consumes;
//! the core only models and rescales them.

use serde::{Deserialize, Serialize};

/// A target extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Create bounds from a width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rescale both dimensions by `scale`, rounding, with a 1 px floor.
    pub fn scaled(self, scale: f64) -> Bounds {
        Bounds {
            width: (self.width as f64 * scale).round().max(1.0) as u32,
            height: (self.height as f64 * scale).round().max(1.0) as u32,
        }
    }
}

/// Where a crop region anchors within the source extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CropAnchor {
    /// Centered in both axes.
    #[default]
    Center,
    /// Top edge, horizontally centered.
    Top,
    /// Bottom edge, horizontally centered.
    Bottom,
    /// Left edge, vertically centered.
    Left,
    /// Right edge, vertically centered.
    Right,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Alignment and offset options for a crop intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropOptions {
    /// Anchor of the crop region.
    pub anchor: CropAnchor,
    /// Pixel offset applied after anchoring, (x, y), positive right/down.
    pub offset: (i32, i32),
}

impl CropOptions {
    /// Rescale the resolution-dependent parts of these options.
    ///
    /// The anchor is dimensionless and passes through; the pixel offset
    /// scales and rounds.
    pub fn scaled(self, scale: f64) -> CropOptions {
        CropOptions {
            anchor: self.anchor,
            offset: (
                (self.offset.0 as f64 * scale).round() as i32,
                (self.offset.1 as f64 * scale).round() as i32,
            ),
        }
    }
}

/// Desired output framing of a transform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeIntent {
    /// Keep the source extent.
    #[default]
    Original,
    /// Scale to fit within the bounds, preserving aspect ratio.
    Fit(Bounds),
    /// Crop, optionally fitting the result within bounds first.
    Crop {
        /// Bounds to fit within before cropping, if any.
        fit: Option<Bounds>,
        /// Alignment and offset of the crop region.
        options: CropOptions,
    },
}

impl SizeIntent {
    /// Produce the equivalent intent for an image `scale` times the size of
    /// the one this intent was expressed against.
    ///
    /// `scale == 1.0` returns `self` unchanged. `Original` is scale-free;
    /// `Fit` scales its bounds; `Crop` scales its fit bounds if present and
    /// delegates to [`CropOptions::scaled`].
    pub fn scaled(self, scale: f64) -> SizeIntent {
        if scale == 1.0 {
            return self;
        }
        match self {
            SizeIntent::Original => SizeIntent::Original,
            SizeIntent::Fit(bounds) => SizeIntent::Fit(bounds.scaled(scale)),
            SizeIntent::Crop { fit, options } => SizeIntent::Crop {
                fit: fit.map(|b| b.scaled(scale)),
                options: options.scaled(scale),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_scaling_rounds() {
        assert_eq!(Bounds::new(100, 51).scaled(0.5), Bounds::new(50, 26));
        assert_eq!(Bounds::new(100, 50).scaled(2.0), Bounds::new(200, 100));
    }

    #[test]
    fn test_bounds_scaling_floor() {
        assert_eq!(Bounds::new(10, 10).scaled(0.01), Bounds::new(1, 1));
    }

    #[test]
    fn test_original_is_scale_free() {
        assert_eq!(SizeIntent::Original.scaled(0.25), SizeIntent::Original);
    }

    #[test]
    fn test_identity_scale_short_circuit() {
        let intent = SizeIntent::Crop {
            fit: Some(Bounds::new(33, 77)),
            options: CropOptions {
                anchor: CropAnchor::TopRight,
                offset: (3, -7),
            },
        };
        assert_eq!(intent.scaled(1.0), intent);
    }

    #[test]
    fn test_fit_scales_bounds() {
        let intent = SizeIntent::Fit(Bounds::new(800, 600));
        assert_eq!(intent.scaled(0.5), SizeIntent::Fit(Bounds::new(400, 300)));
    }

    #[test]
    fn test_crop_scales_fit_and_options() {
        let intent = SizeIntent::Crop {
            fit: Some(Bounds::new(200, 100)),
            options: CropOptions {
                anchor: CropAnchor::BottomLeft,
                offset: (10, -4),
            },
        };
        assert_eq!(
            intent.scaled(0.5),
            SizeIntent::Crop {
                fit: Some(Bounds::new(100, 50)),
                options: CropOptions {
                    anchor: CropAnchor::BottomLeft,
                    offset: (5, -2),
                },
            }
        );
    }

    #[test]
    fn test_crop_without_fit_bounds() {
        let intent = SizeIntent::Crop {
            fit: None,
            options: CropOptions::default(),
        };
        assert_eq!(intent.scaled(0.5), intent);
    }
}
