use tracing::debug;

use super::curve::SampledCurve;
use crate::error::{TrackError, TrackResult};
use crate::sim::Float3;

/// Most refinement rounds [`build_curve`] accepts.
pub const MAX_SUBDIVISIONS: u32 = 16;

/// Number of samples produced by [`build_curve`] for a closed polygon of
/// `closed_len` points after `subdivisions` rounds.
///
/// Each round maps `n` points to `2n - 1`, so `n_N = 1 + (n_0 - 1) · 2^N`.
/// `None` for an empty polygon or a count that overflows `usize`.
pub fn subdivided_len(closed_len: usize, subdivisions: u32) -> Option<usize> {
    let edges = closed_len.checked_sub(1)?;
    let per_edge = 1usize.checked_shl(subdivisions)?;
    edges.checked_mul(per_edge)?.checked_add(1)
}

/// Smooths a closed control polygon into a dense closed curve.
///
/// The polygon is closed first if its last point differs from its first.
/// Every round splits each edge at its midpoint and then replaces the
/// sequence with the midpoints of its own edges (corner cutting), re-closing
/// by appending the new first sample. The output's first and last samples
/// are identical.
///
/// # Errors
/// [`TrackError::InvalidInput`] for fewer than 2 points, non-finite
/// coordinates, a polygon with zero total length, or more than
/// [`MAX_SUBDIVISIONS`] rounds.
pub fn build_curve(control_points: &[Float3], subdivisions: u32) -> TrackResult<SampledCurve> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(TrackError::invalid_input(format!(
            "at most {MAX_SUBDIVISIONS} subdivision rounds, got {subdivisions}"
        )));
    }
    if control_points.len() < 2 {
        return Err(TrackError::invalid_input(format!(
            "need at least 2 control points, got {}",
            control_points.len()
        )));
    }
    if let Some(i) = control_points.iter().position(|p| !p.is_finite()) {
        return Err(TrackError::invalid_input(format!(
            "control point {i} has a non-finite coordinate"
        )));
    }

    let mut points = control_points.to_vec();
    if points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    let perimeter: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    if perimeter <= 0.0 {
        return Err(TrackError::invalid_input(
            "control polygon has zero length",
        ));
    }

    for round in 0..subdivisions {
        points = refine(&points);
        debug!(round, samples = points.len(), "subdivided track curve");
    }

    SampledCurve::new(points)
}

fn refine(points: &[Float3]) -> Vec<Float3> {
    let mut split = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        split.push(pair[0]);
        split.push(pair[0].midpoint(pair[1]));
    }
    split.push(points[points.len() - 1]);

    let mut smoothed: Vec<Float3> = split.windows(2).map(|w| w[0].midpoint(w[1])).collect();
    smoothed.push(smoothed[0]);
    smoothed
}
