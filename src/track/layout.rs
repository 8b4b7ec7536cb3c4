use tracing::info;

use super::builder::build_curve;
use super::curve::SampledCurve;
use super::rails::{offset_rails, Rails};
use crate::error::TrackResult;
use crate::sim::{Float3, SimulationParams};

/// Static track geometry shared by every tick of a ride.
#[derive(Debug, Clone)]
pub struct Track {
    pub curve: SampledCurve,
    pub rails: Rails,
    pub params: SimulationParams,
}

impl Track {
    /// Builds the centreline and rails once at startup.
    ///
    /// # Errors
    /// Any construction error; these are not recoverable per tick.
    pub fn build(control_points: &[Float3], params: SimulationParams) -> TrackResult<Self> {
        let curve = build_curve(control_points, params.subdivisions)?;
        let rails = offset_rails(&curve, params.rail_offset, params.gravity)?;

        info!(
            control_points = control_points.len(),
            samples = curve.len(),
            length = curve.total_length(),
            crest_y = curve.crest().y,
            "built track"
        );

        Ok(Self {
            curve,
            rails,
            params,
        })
    }
}
