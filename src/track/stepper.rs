use super::curve::SampledCurve;
use crate::error::{TrackError, TrackResult};
use crate::sim::{physics, CyclicIndex, Float3};

/// Result of one arc-length step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStep {
    /// New bead position, on the segment `index -> index + 1`.
    pub position: Float3,
    /// Resumption hint for the next call; not necessarily the nearest sample.
    pub index: CyclicIndex,
}

/// Advances `position` by `delta` along the piecewise-linear curve.
///
/// `position` is expected on the segment starting at `index`. If the next
/// sample is farther than `delta` the bead slides toward it; otherwise whole
/// segments are consumed greedily and the remainder is interpolated inside
/// the segment that would overshoot. Whole laps are dropped first, so one
/// call walks at most one lap. The index only ever moves forward and wraps
/// across the closing seam.
///
/// A bead that ends within [`physics::SNAP_DISTANCE`] of the next sample is
/// placed on it and the index advances, skipping zero-length segments such
/// as the closing duplicate. A remainder that falls inside a segment shorter
/// than [`physics::EPSILON`] snaps to that segment's end.
///
/// # Errors
/// - [`TrackError::InvalidInput`] if `delta` is negative or not finite.
/// - [`TrackError::DegenerateSegment`] if the curve has no length to walk.
pub fn step(
    curve: &SampledCurve,
    position: Float3,
    index: CyclicIndex,
    delta: f32,
) -> TrackResult<ArcStep> {
    if !delta.is_finite() || delta < 0.0 {
        return Err(TrackError::invalid_input(format!(
            "arc-length step must be finite and non-negative, got {delta}"
        )));
    }
    let total = curve.total_length();
    if total < physics::EPSILON {
        return Err(TrackError::DegenerateSegment { index: index.get() });
    }
    let delta = delta % total;

    let next = curve.point(index.next());
    let to_next = position.distance(next);

    if to_next > delta {
        let moved = position.lerp(next, delta / to_next);
        return Ok(settle(curve, moved, index));
    }

    let mut covered = to_next;
    let mut i = index.next();
    let mut segment = curve.segment_length(i);
    while covered + segment < delta {
        covered += segment;
        i = i.next();
        segment = curve.segment_length(i);
    }

    let leftover = delta - covered;
    let landed = if leftover <= 0.0 {
        curve.point(i)
    } else if segment < physics::EPSILON {
        i = i.next();
        curve.point(i)
    } else {
        curve.point(i).lerp(curve.point(i.next()), leftover / segment)
    };

    Ok(settle(curve, landed, i))
}

/// Rolls a bead sitting on the end of its segment onto the following ones.
fn settle(curve: &SampledCurve, position: Float3, index: CyclicIndex) -> ArcStep {
    let mut settled = ArcStep { position, index };
    for _ in 0..curve.len() {
        let next = curve.point(settled.index.next());
        if settled.position.distance(next) > physics::SNAP_DISTANCE {
            break;
        }
        settled = ArcStep {
            position: next,
            index: settled.index.next(),
        };
    }
    settled
}
