//! Geometric transform intents and their application order.
//!
//! This module models the closed set of transforms applied to decoded
//! frames before re-encoding, plus the desired output framing.
//!
//! # Transform Order
//!
//! Operations carry fixed priorities and are applied in this order:
//! 1. Rotation (with a fill policy for exposed canvas)
//! 2. Vertical flip
//! 3. Horizontal mirror
//! 4. Custom caller-supplied transforms
//!
//! The pixel work itself is done by an external [`RenderEngine`]; the core
//! hands it one operation at a time and threads each output into the next
//! operation's input.
//!
//! # Coordinate System
//!
//! - Rotation angles are in radians, positive = counter-clockwise
//! - Origin is top-left corner; crop offsets are positive right/down

mod operation;
mod scale;
mod size;

pub use operation::{
    CustomTransform, FillPolicy, Operation, OperationSet, CUSTOM_ANGLE_TOLERANCE,
};
pub use size::{Bounds, CropAnchor, CropOptions, SizeIntent};

use crate::decode::{DecodedImage, Orientation, PixelSource};
use crate::frame::Frame;

/// The rendering half of the external decoding/rendering collaborator.
///
/// An engine receives one operation at a time together with the frame's
/// current payload and gain map, and returns the transformed payloads. The
/// orientation hint lets the engine bake EXIF orientation into the same
/// pass; the frame index is diagnostic context.
pub trait RenderEngine {
    /// Apply one operation to a pixel payload and its optional gain map.
    fn apply_operation(
        &self,
        primary: PixelSource,
        gain_map: Option<DecodedImage>,
        operation: &Operation,
        orientation: Orientation,
        frame_index: usize,
    ) -> (PixelSource, Option<DecodedImage>);
}

/// Apply an operation set to one frame, in priority order.
///
/// Each engine output becomes the next operation's input; the frame's
/// timing metadata is untouched. A frame with no payload, or an empty set,
/// passes through unchanged.
pub fn apply_operations(
    engine: &dyn RenderEngine,
    mut frame: Frame,
    operations: &OperationSet,
    orientation: Orientation,
    frame_index: usize,
) -> Frame {
    if operations.is_empty() || frame.payload().is_none() {
        return frame;
    }

    let (payload, mut gain_map) = frame.take_payload();
    let mut primary = payload.expect("payload checked above");

    for operation in operations.ordered() {
        let (next_primary, next_gain) =
            engine.apply_operation(primary, gain_map, &operation, orientation, frame_index);
        primary = next_primary;
        gain_map = next_gain;
    }

    frame.with_payload(primary, gain_map)
}
