//! Animation duration and frame-rate adaptation.
//!
//! [`total_duration`] sums a sequence's per-frame delays;
//! [`adapt_frame_rate`] thins a sequence down to a target playback rate
//! while preserving total duration by stretching the retained frames'
//! delays.
//!
//! # Retained-index selection
//!
//! The adapter builds its retained-index set with 1-based arithmetic
//! (`{1} ∪ {ceil(N·i/(target-1))}`) and then tests the set directly against
//! 0-based frame positions. The mismatch is inherited from the original
//! implementation and is kept bit-for-bit: the constructed index N never
//! matches a real position, and the first frame survives through index 1
//! matching position 1, not position 0. Downstream consumers depend on the
//! observed sampling pattern, so do not "correct" it here.

use std::collections::BTreeSet;

use super::Frame;

/// Upper bound applied to the clamped `delay_time` of adapted frames.
///
/// Note the direction: adaptation caps the clamped delay at 0.1 s, the
/// opposite of the 0.1 s *minimum* used at metadata extraction. This mirrors
/// the original implementation's floor-codec convention and is intentional.
pub const MAX_ADAPTED_DELAY: f64 = 0.1;

/// Effective delay contribution of one frame: the unclamped delay if
/// present, else the clamped delay, else zero.
fn effective_delay(frame: &Frame) -> f64 {
    frame
        .unclamped_delay_time
        .or(frame.delay_time)
        .unwrap_or(0.0)
}

/// Total playback duration of an animated sequence in seconds.
///
/// Returns `None` for sequences of fewer than 2 frames, and for sequences
/// whose delays sum to exactly zero (all delays absent) — an undefined
/// duration, not a zero one. Callers must not invoke [`adapt_frame_rate`]
/// when this returns `None`.
pub fn total_duration(frames: &[Frame]) -> Option<f64> {
    if frames.len() < 2 {
        return None;
    }
    let sum: f64 = frames.iter().map(effective_delay).sum();
    if sum == 0.0 {
        None
    } else {
        Some(sum)
    }
}

/// Result of a frame-rate adaptation pass.
#[derive(Debug, Clone)]
pub struct AdaptedSequence {
    /// The (possibly thinned) frame sequence. Unchanged when `thinned` is
    /// false.
    pub frames: Vec<Frame>,
    /// The target rate when thinning occurred, otherwise the rounded
    /// nominal rate of the input.
    pub frame_rate: u32,
    /// Whether any frames were dropped.
    pub thinned: bool,
}

/// Reduce a frame sequence to approximate `target_rate` frames per second,
/// preserving total playback duration.
///
/// `duration` must be the sequence's total duration as computed by
/// [`total_duration`]; degenerate inputs (fewer than 2 frames, zero
/// duration) are the caller's responsibility to guard.
///
/// If `target_rate` is at or above the sequence's rounded nominal rate the
/// sequence is returned unchanged with that nominal rate. Otherwise the
/// retained frames get their delays stretched by the inverse of the thinning
/// ratio, with the clamped `delay_time` capped at [`MAX_ADAPTED_DELAY`].
/// Dropped frames are consumed here, releasing their pixel payloads.
pub fn adapt_frame_rate(frames: Vec<Frame>, duration: f64, target_rate: u32) -> AdaptedSequence {
    debug_assert!(frames.len() >= 2, "adapter requires at least 2 frames");
    debug_assert!(duration > 0.0, "adapter requires a positive duration");

    let n = frames.len();
    let nominal_rate = n as f64 / duration;
    let nominal_rounded = nominal_rate.round() as u32;

    if target_rate >= nominal_rounded {
        return AdaptedSequence {
            frames,
            frame_rate: nominal_rounded,
            thinned: false,
        };
    }

    let scale = target_rate as f64 / nominal_rate;
    let target_count = (n as f64 * scale).round() as usize;

    // 1-based construction: index 1 always, then ceil(N*i/(target-1)) for
    // each intermediate step. Collisions collapse in the set.
    let mut retained = BTreeSet::new();
    retained.insert(1usize);
    for i in 1..target_count {
        retained.insert((n * i).div_ceil(target_count - 1));
    }

    let inverse_scale = 1.0 / scale;
    let mut thinned = Vec::with_capacity(retained.len());
    for (position, mut frame) in frames.into_iter().enumerate() {
        // Tested 0-based on purpose; see the module docs.
        if !retained.contains(&position) {
            continue;
        }
        let old_delay = effective_delay(&frame);
        let new_delay = old_delay * inverse_scale;
        frame.unclamped_delay_time = Some(new_delay);
        frame.delay_time = Some(MAX_ADAPTED_DELAY.min((new_delay * 10.0).round() / 10.0));
        thinned.push(frame);
    }

    AdaptedSequence {
        frames: thinned,
        frame_rate: target_rate,
        thinned: true,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
