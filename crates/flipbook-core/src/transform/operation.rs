//! Geometric transform operations and their equality/ordering contract.
//!
//! Operations compare by transform identity, not configuration: two
//! rotations are equal iff their angles match, regardless of fill policy,
//! and all custom transforms are equal to each other. This reduced equality
//! is what lets [`OperationSet`] de-duplicate by transform kind while each
//! instance still carries its own configuration.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::decode::PixelSource;

/// Tolerance, in radians, below which a rotation angle counts as a multiple
/// of 90 degrees. Guards representation differences between degree-sourced
/// and radian-sourced angles.
pub const CUSTOM_ANGLE_TOLERANCE: f64 = 1e-6;

/// How newly exposed canvas area is handled when a rotation leaves the
/// original bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillPolicy {
    /// Crop the canvas back to the filled region.
    Crop,
    /// Extend the edges with a blur of the given kernel radius.
    Blur {
        /// Blur kernel radius in pixels; kernel sizes must be odd.
        radius: u32,
    },
    /// Fill with a solid color.
    Color {
        /// Alpha channel (0-255).
        alpha: u8,
        /// Red channel (0-255).
        red: u8,
        /// Green channel (0-255).
        green: u8,
        /// Blue channel (0-255).
        blue: u8,
    },
}

impl FillPolicy {
    /// Rescale this policy for an image `scale` times the size of the one it
    /// was configured for.
    ///
    /// Only the blur radius carries a resolution-dependent quantity; it is
    /// re-quantized to the nearest odd kernel size (minimum 1). Crop and
    /// solid-color fills pass through unchanged.
    pub fn scaled(self, scale: f64) -> FillPolicy {
        match self {
            FillPolicy::Blur { radius } => {
                let scaled = (radius as f64 * scale).round().max(1.0) as u32;
                let radius = if scaled % 2 == 0 { scaled + 1 } else { scaled };
                FillPolicy::Blur { radius }
            }
            other => other,
        }
    }
}

/// A caller-supplied transform over a pixel payload.
///
/// The callable is shared behind an `Arc`, so it outlives every operation
/// value cloned from the same original. It takes no part in equality or
/// hashing, and cannot be rescaled for a different-resolution image — the
/// operation-set scaler drops custom transforms instead.
#[derive(Clone)]
pub struct CustomTransform {
    func: Arc<dyn Fn(PixelSource) -> PixelSource + Send + Sync>,
}

impl CustomTransform {
    /// Wrap a transform function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(PixelSource) -> PixelSource + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Apply the transform to a pixel payload.
    pub fn apply(&self, source: PixelSource) -> PixelSource {
        (self.func)(source)
    }
}

impl fmt::Debug for CustomTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTransform").finish_non_exhaustive()
    }
}

/// One geometric transform.
///
/// Angles are in radians, counter-clockwise positive, matching the rendering
/// engine's convention; degree-sourced callers convert with
/// [`f64::to_radians`].
#[derive(Debug, Clone)]
pub enum Operation {
    /// Rotation with a policy for newly exposed canvas area.
    Rotate {
        /// Rotation angle in radians.
        angle: f64,
        /// Fill policy for the exposed canvas.
        fill: FillPolicy,
    },
    /// Vertical flip (top-bottom).
    Flip,
    /// Horizontal mirror (left-right).
    Mirror,
    /// Caller-supplied transform, always applied last.
    Custom(CustomTransform),
}

impl Operation {
    /// Application priority. Lower applies first; the gap before `Custom`
    /// keeps caller transforms last regardless of how many built-in kinds
    /// exist.
    pub fn priority(&self) -> u32 {
        match self {
            Operation::Rotate { .. } => 1,
            Operation::Flip => 2,
            Operation::Mirror => 3,
            Operation::Custom(_) => 100,
        }
    }

    /// Whether this is a rotation by other than a multiple of 90 degrees,
    /// within [`CUSTOM_ANGLE_TOLERANCE`].
    ///
    /// Such rotations change the canvas extent, which is what the fill
    /// policy exists for.
    pub fn is_rotation_by_custom_angle(&self) -> bool {
        match self {
            Operation::Rotate { angle, .. } => {
                let rem = angle.rem_euclid(FRAC_PI_2);
                rem.min(FRAC_PI_2 - rem) > CUSTOM_ANGLE_TOLERANCE
            }
            _ => false,
        }
    }

    fn discriminant(&self) -> u8 {
        match self {
            Operation::Rotate { .. } => 0,
            Operation::Flip => 1,
            Operation::Mirror => 2,
            Operation::Custom(_) => 3,
        }
    }
}

// Reduced equality: discriminant plus, for rotations, the angle. Fill
// policies and custom callables are configuration, not identity.
impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operation::Rotate { angle: a, .. }, Operation::Rotate { angle: b, .. }) => {
                a.to_bits() == b.to_bits()
            }
            _ => self.discriminant() == other.discriminant(),
        }
    }
}

impl Eq for Operation {}

impl Hash for Operation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
        if let Operation::Rotate { angle, .. } = self {
            angle.to_bits().hash(state);
        }
    }
}

/// A de-duplicated collection of operations with a deterministic application
/// order.
///
/// Insertion de-duplicates by the reduced equality above; [`ordered`]
/// produces the application sequence sorted by [`Operation::priority`].
/// Insertion order breaks priority ties, though ties cannot arise for
/// rotations (equal-angle rotations collapse on insert) and the other kinds
/// are singletons by equality.
///
/// [`ordered`]: OperationSet::ordered
#[derive(Debug, Clone, Default)]
pub struct OperationSet {
    ops: Vec<Operation>,
}

impl OperationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an operation. Returns false (and keeps the existing value) if
    /// an equal operation is already present.
    pub fn insert(&mut self, op: Operation) -> bool {
        if self.ops.contains(&op) {
            return false;
        }
        self.ops.push(op);
        true
    }

    /// Whether an equal operation is present.
    pub fn contains(&self, op: &Operation) -> bool {
        self.ops.contains(op)
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }

    /// The operations in application order: sorted by priority, stable with
    /// respect to insertion order.
    pub fn ordered(&self) -> Vec<Operation> {
        let mut ops = self.ops.clone();
        ops.sort_by_key(Operation::priority);
        ops
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        let mut set = OperationSet::new();
        for op in iter {
            set.insert(op);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotate(angle: f64) -> Operation {
        Operation::Rotate {
            angle,
            fill: FillPolicy::Crop,
        }
    }

    fn custom() -> Operation {
        Operation::Custom(CustomTransform::new(|p| p))
    }

    #[test]
    fn test_rotate_equality_ignores_fill() {
        let a = Operation::Rotate {
            angle: FRAC_PI_2,
            fill: FillPolicy::Crop,
        };
        let b = Operation::Rotate {
            angle: FRAC_PI_2,
            fill: FillPolicy::Color {
                alpha: 255,
                red: 0,
                green: 0,
                blue: 0,
            },
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_rotate_equality_respects_angle() {
        assert_ne!(rotate(FRAC_PI_2), rotate(std::f64::consts::PI));
    }

    #[test]
    fn test_custom_transforms_compare_equal() {
        // Identity by kind only: the callables are not comparable.
        assert_eq!(custom(), custom());
        assert_ne!(custom(), Operation::Flip);
    }

    #[test]
    fn test_priority_ordering() {
        let set: OperationSet = [
            custom(),
            Operation::Mirror,
            rotate(1.0),
            Operation::Flip,
        ]
        .into_iter()
        .collect();

        let priorities: Vec<u32> = set.ordered().iter().map(Operation::priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 100]);
    }

    #[test]
    fn test_set_deduplicates() {
        let mut set = OperationSet::new();
        assert!(set.insert(rotate(1.0)));
        assert!(!set.insert(Operation::Rotate {
            angle: 1.0,
            fill: FillPolicy::Blur { radius: 5 },
        }));
        assert!(set.insert(rotate(2.0)));
        assert!(set.insert(Operation::Flip));
        assert!(!set.insert(Operation::Flip));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_custom_angle_within_tolerance() {
        // 90.0000001 degrees differs from pi/2 by ~1.7e-9 rad, inside the
        // tolerance.
        let op = rotate(90.000_000_1_f64.to_radians());
        assert!(!op.is_rotation_by_custom_angle());
    }

    #[test]
    fn test_custom_angle_detected() {
        let op = rotate(91.0_f64.to_radians());
        assert!(op.is_rotation_by_custom_angle());
    }

    #[test]
    fn test_right_angle_rotations_not_custom() {
        for quarter_turns in 0..8 {
            let op = rotate(quarter_turns as f64 * FRAC_PI_2);
            assert!(
                !op.is_rotation_by_custom_angle(),
                "quarter turns: {}",
                quarter_turns
            );
        }
    }

    #[test]
    fn test_negative_angle_custom_detection() {
        assert!(!rotate(-FRAC_PI_2).is_rotation_by_custom_angle());
        assert!(rotate(-0.3).is_rotation_by_custom_angle());
    }

    #[test]
    fn test_non_rotations_never_custom_angle() {
        assert!(!Operation::Flip.is_rotation_by_custom_angle());
        assert!(!Operation::Mirror.is_rotation_by_custom_angle());
        assert!(!custom().is_rotation_by_custom_angle());
    }

    #[test]
    fn test_blur_fill_scaling_stays_odd() {
        assert_eq!(
            FillPolicy::Blur { radius: 5 }.scaled(0.5),
            FillPolicy::Blur { radius: 3 }
        );
        assert_eq!(
            FillPolicy::Blur { radius: 3 }.scaled(2.0),
            FillPolicy::Blur { radius: 7 }
        );
        // Never collapses below a usable kernel
        assert_eq!(
            FillPolicy::Blur { radius: 3 }.scaled(0.01),
            FillPolicy::Blur { radius: 1 }
        );
    }

    #[test]
    fn test_non_blur_fill_scaling_unchanged() {
        assert_eq!(FillPolicy::Crop.scaled(0.5), FillPolicy::Crop);
        let color = FillPolicy::Color {
            alpha: 10,
            red: 20,
            green: 30,
            blue: 40,
        };
        assert_eq!(color.scaled(0.5), color);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of(op: &Operation) -> u64 {
            let mut h = DefaultHasher::new();
            op.hash(&mut h);
            h.finish()
        }

        let a = Operation::Rotate {
            angle: 1.0,
            fill: FillPolicy::Crop,
        };
        let b = Operation::Rotate {
            angle: 1.0,
            fill: FillPolicy::Blur { radius: 9 },
        };
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&custom()), hash_of(&custom()));
    }
}
