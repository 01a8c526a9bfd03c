//! Rescaling an operation set for an auxiliary image.
//!
//! When a primary image carries an HDR gain map at a different resolution,
//! the same transform request must be replayed against the gain map. The
//! scale factor comes from [`Frame::gain_map_scale`]; this module derives
//! the equivalent operation set for the auxiliary image.
//!
//! Custom transforms cannot be safely replayed against a different
//! resolution without caller-supplied rescaling logic, so scaling drops them.
//! This is a documented limitation, not an oversight.
//!
//! [`Frame::gain_map_scale`]: crate::frame::Frame::gain_map_scale

use super::operation::{Operation, OperationSet};

impl OperationSet {
    /// Produce the equivalent operation set for an image `scale` times the
    /// size of the one this set was expressed against.
    ///
    /// `scale == 1.0` returns a clone unchanged. Rotations keep their angle
    /// (angles are resolution-independent) and rescale their fill policy;
    /// flips and mirrors pass through; custom transforms are dropped.
    pub fn scaled(&self, scale: f64) -> OperationSet {
        if scale == 1.0 {
            return self.clone();
        }
        self.iter()
            .filter_map(|op| match op {
                Operation::Rotate { angle, fill } => Some(Operation::Rotate {
                    angle: *angle,
                    fill: fill.scaled(scale),
                }),
                Operation::Flip => Some(Operation::Flip),
                Operation::Mirror => Some(Operation::Mirror),
                Operation::Custom(_) => None,
            })
            .collect()
    }
}
