use tracing::warn;

use super::curve::SampledCurve;
use crate::error::{TrackError, TrackResult};
use crate::sim::{CyclicIndex, Float3, Frame};

/// Two rails running parallel to the centreline.
#[derive(Debug, Clone, PartialEq)]
pub struct Rails {
    /// Centreline shifted along `+binormal`.
    pub left: Vec<Float3>,
    /// Centreline shifted along `-binormal`.
    pub right: Vec<Float3>,
}

/// Frame of sample `index` from its immediate neighbours.
///
/// On a closed curve the closing duplicate is not a neighbour of sample 0
/// (or vice versa), so both ends see the same true neighbours.
pub fn rail_frame(
    curve: &SampledCurve,
    index: CyclicIndex,
    external_acceleration: Float3,
) -> TrackResult<Frame> {
    Frame::estimate(
        curve.point(curve.prev_distinct(index)),
        curve.point(index),
        curve.point(curve.next_distinct(index)),
        external_acceleration,
    )
}

/// Offsets every sample sideways by `offset` along its ride-frame binormal.
///
/// Frames come from [`rail_frame`]. Samples where the frame is degenerate reuse the nearest
/// preceding good binormal (the first good one for a leading run).
///
/// # Errors
/// [`TrackError::DegenerateFrame`] if no sample yields a frame.
pub fn offset_rails(
    curve: &SampledCurve,
    offset: f32,
    external_acceleration: Float3,
) -> TrackResult<Rails> {
    let binormals: Vec<Option<Float3>> = (0..curve.len())
        .map(|raw| {
            rail_frame(curve, curve.index(raw), external_acceleration)
                .ok()
                .map(|frame| frame.binormal)
        })
        .collect();

    let first_good = binormals
        .iter()
        .flatten()
        .copied()
        .next()
        .ok_or(TrackError::DegenerateFrame)?;

    let degenerate = binormals.iter().filter(|b| b.is_none()).count();
    if degenerate > 0 {
        warn!(degenerate, "reused neighbouring binormals for rail samples");
    }

    let mut left = Vec::with_capacity(curve.len());
    let mut right = Vec::with_capacity(curve.len());
    let mut held = first_good;
    for (p, binormal) in curve.points().iter().zip(&binormals) {
        if let Some(b) = binormal {
            held = *b;
        }
        left.push(*p + held * offset);
        right.push(*p - held * offset);
    }

    Ok(Rails { left, right })
}
