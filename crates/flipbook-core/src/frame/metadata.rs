//! Per-frame animation metadata normalization.
//!
//! The four animated container formats report delay, loop count, and canvas
//! size under format-specific property dictionaries. This module maps any of
//! them onto one unified [`FrameMetadata`] record.
//!
//! Extraction is best-effort: a missing or malformed dictionary yields a
//! record with every field absent, never an error. Absent keys stay `None`;
//! they are not defaulted to zero.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Codec-convention minimum inter-frame delay in seconds.
///
/// Browsers and decoders treat sub-0.1 s delays as 0.1 s; the clamped
/// `delay_time` field follows that convention while `unclamped_delay_time`
/// keeps the raw value.
pub const MIN_FRAME_DELAY: f64 = 0.1;

// Inner key names are shared across all four container dictionaries; only
// the container key differs.
const KEY_DELAY_TIME: &str = "DelayTime";
const KEY_UNCLAMPED_DELAY_TIME: &str = "UnclampedDelayTime";
const KEY_LOOP_COUNT: &str = "LoopCount";
const KEY_CANVAS_WIDTH: &str = "CanvasPixelWidth";
const KEY_CANVAS_HEIGHT: &str = "CanvasPixelHeight";
const KEY_FRAME_INFO: &str = "FrameInfoArray";

/// The closed set of animated container formats with per-frame metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimatedFormat {
    /// Graphics Interchange Format.
    Gif,
    /// HEIC image sequence.
    HeicSequence,
    /// Animated WebP.
    WebP,
    /// Animated PNG.
    Apng,
}

impl AnimatedFormat {
    /// Probe order: the first format whose container dictionary is present
    /// in a raw property dictionary wins. A well-formed dictionary contains
    /// at most one; ambiguity resolves by this precedence, never by merging.
    pub const PRECEDENCE: [AnimatedFormat; 4] = [
        AnimatedFormat::Gif,
        AnimatedFormat::HeicSequence,
        AnimatedFormat::WebP,
        AnimatedFormat::Apng,
    ];

    /// Key of this format's sub-dictionary inside a raw frame property
    /// dictionary.
    pub fn container_key(self) -> &'static str {
        match self {
            AnimatedFormat::Gif => "{GIF}",
            AnimatedFormat::HeicSequence => "{HEICS}",
            AnimatedFormat::WebP => "{WebP}",
            AnimatedFormat::Apng => "{PNG}",
        }
    }
}

/// Unified per-frame animation metadata.
///
/// Every field is optional; absence means the source dictionary did not
/// carry the key (or carried it malformed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Inter-frame delay in seconds, clamped to [`MIN_FRAME_DELAY`].
    pub delay_time: Option<f64>,
    /// True intended delay in seconds, without the floor.
    pub unclamped_delay_time: Option<f64>,
    /// Sequence repeat count; 0 means infinite.
    pub loop_count: Option<u32>,
    /// Logical animation canvas width.
    pub canvas_width: Option<u32>,
    /// Logical animation canvas height.
    pub canvas_height: Option<u32>,
    /// Raw per-frame info, passed through uninterpreted.
    pub frame_info: Option<Value>,
}

/// Map a raw per-frame property dictionary onto the unified record.
///
/// Tries each recognized format's container dictionary in
/// [`AnimatedFormat::PRECEDENCE`] order and extracts from the first one
/// found. Pure; a dictionary with no recognized container (or a non-object
/// value) yields `FrameMetadata::default()`.
pub fn normalize_metadata(raw: &Value) -> FrameMetadata {
    for format in AnimatedFormat::PRECEDENCE {
        if let Some(container) = raw.get(format.container_key()) {
            return extract(container);
        }
    }
    FrameMetadata::default()
}

fn extract(container: &Value) -> FrameMetadata {
    FrameMetadata {
        delay_time: seconds(container, KEY_DELAY_TIME).map(|d| d.max(MIN_FRAME_DELAY)),
        unclamped_delay_time: seconds(container, KEY_UNCLAMPED_DELAY_TIME),
        loop_count: unsigned(container, KEY_LOOP_COUNT),
        canvas_width: unsigned(container, KEY_CANVAS_WIDTH),
        canvas_height: unsigned(container, KEY_CANVAS_HEIGHT),
        frame_info: container.get(KEY_FRAME_INFO).cloned(),
    }
}

fn seconds(container: &Value, key: &str) -> Option<f64> {
    container.get(key)?.as_f64()
}

fn unsigned(container: &Value, key: &str) -> Option<u32> {
    let n = container.get(key)?.as_u64()?;
    u32::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gif_dictionary() {
        let raw = json!({
            "{GIF}": {
                "DelayTime": 0.25,
                "UnclampedDelayTime": 0.04,
                "LoopCount": 0,
                "CanvasPixelWidth": 320,
                "CanvasPixelHeight": 240,
            }
        });
        let meta = normalize_metadata(&raw);
        assert_eq!(meta.delay_time, Some(0.25));
        assert_eq!(meta.unclamped_delay_time, Some(0.04));
        assert_eq!(meta.loop_count, Some(0));
        assert_eq!(meta.canvas_width, Some(320));
        assert_eq!(meta.canvas_height, Some(240));
        assert_eq!(meta.frame_info, None);
    }

    #[test]
    fn test_delay_clamped_to_minimum() {
        let raw = json!({ "{GIF}": { "DelayTime": 0.02, "UnclampedDelayTime": 0.02 } });
        let meta = normalize_metadata(&raw);
        // Clamp applies to the delay field only; the unclamped field keeps
        // the raw value.
        assert_eq!(meta.delay_time, Some(MIN_FRAME_DELAY));
        assert_eq!(meta.unclamped_delay_time, Some(0.02));
    }

    #[test]
    fn test_each_container_recognized() {
        for format in AnimatedFormat::PRECEDENCE {
            let raw = json!({ format.container_key(): { "DelayTime": 0.5 } });
            let meta = normalize_metadata(&raw);
            assert_eq!(meta.delay_time, Some(0.5), "format {:?}", format);
        }
    }

    #[test]
    fn test_precedence_order_resolves_ambiguity() {
        // Two containers present: the earlier format in precedence order
        // wins; nothing is merged.
        let raw = json!({
            "{PNG}": { "DelayTime": 0.9, "LoopCount": 3 },
            "{GIF}": { "DelayTime": 0.5 },
        });
        let meta = normalize_metadata(&raw);
        assert_eq!(meta.delay_time, Some(0.5));
        assert_eq!(meta.loop_count, None);
    }

    #[test]
    fn test_absent_keys_stay_absent() {
        let raw = json!({ "{WebP}": { "LoopCount": 2 } });
        let meta = normalize_metadata(&raw);
        assert_eq!(meta.loop_count, Some(2));
        assert_eq!(meta.delay_time, None);
        assert_eq!(meta.unclamped_delay_time, None);
        assert_eq!(meta.canvas_width, None);
        assert_eq!(meta.canvas_height, None);
    }

    #[test]
    fn test_unrecognized_dictionary_yields_empty_record() {
        let raw = json!({ "{TIFF}": { "DelayTime": 0.5 } });
        assert_eq!(normalize_metadata(&raw), FrameMetadata::default());
    }

    #[test]
    fn test_malformed_values_yield_absent_fields() {
        let raw = json!({
            "{GIF}": {
                "DelayTime": "fast",
                "LoopCount": -2,
                "CanvasPixelWidth": 1.5,
            }
        });
        let meta = normalize_metadata(&raw);
        assert_eq!(meta.delay_time, None);
        assert_eq!(meta.loop_count, None);
        assert_eq!(meta.canvas_width, None);
    }

    #[test]
    fn test_non_object_input() {
        assert_eq!(normalize_metadata(&json!(null)), FrameMetadata::default());
        assert_eq!(normalize_metadata(&json!(42)), FrameMetadata::default());
    }

    #[test]
    fn test_frame_info_passthrough() {
        let info = json!([{ "Index": 0, "X": 4 }, { "Index": 1 }]);
        let raw = json!({ "{HEICS}": { "FrameInfoArray": info.clone() } });
        let meta = normalize_metadata(&raw);
        assert_eq!(meta.frame_info, Some(info));
    }
}
