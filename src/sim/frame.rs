use super::curvature::Curvature;
use super::math::{Float3, Matrix4};
use crate::error::{TrackError, TrackResult};

/// Orthonormal ride frame at the bead.
///
/// Right-handed system of three unit vectors plus the point they hang from:
/// - `tangent`: direction of travel
/// - `normal`: "felt" up, the curve normal biased by the external acceleration
/// - `binormal`: `tangent × normal`, pointing to the rider's side
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Float3,
    pub normal: Float3,
    pub binormal: Float3,
    pub origin: Float3,
}

impl Frame {
    pub const fn new(tangent: Float3, normal: Float3, binormal: Float3, origin: Float3) -> Self {
        Self {
            tangent,
            normal,
            binormal,
            origin,
        }
    }

    /// Builds the frame at `current` from samples behind and ahead of it.
    ///
    /// The centripetal term `k · n` from [`Curvature::from_points`] is added to
    /// `external_acceleration` to get the felt normal. The tangent is then
    /// re-derived as `normal × binormal`, so the result is orthonormal even when
    /// the chord is not perpendicular to the felt normal.
    ///
    /// # Errors
    /// [`TrackError::DegenerateFrame`] when any normalized vector is near zero.
    pub fn estimate(
        prev: Float3,
        current: Float3,
        future: Float3,
        external_acceleration: Float3,
    ) -> TrackResult<Self> {
        let curvature = Curvature::from_points(prev, current, future);

        let felt = (curvature.perpendicular_acceleration() + external_acceleration)
            .try_normalize()
            .ok_or(TrackError::DegenerateFrame)?;
        let chord = (future - prev)
            .try_normalize()
            .ok_or(TrackError::DegenerateFrame)?;
        let binormal = chord
            .cross(felt)
            .try_normalize()
            .ok_or(TrackError::DegenerateFrame)?;
        let tangent = felt
            .cross(binormal)
            .try_normalize()
            .ok_or(TrackError::DegenerateFrame)?;

        Ok(Self::new(tangent, felt, binormal, current))
    }

    /// Same orientation, moved to `origin`.
    pub fn with_origin(self, origin: Float3) -> Self {
        Self { origin, ..self }
    }

    /// Model matrix with columns `(tangent, normal, binormal, origin)`.
    pub fn to_pose(&self) -> Matrix4 {
        Matrix4::from_axes(self.tangent, self.normal, self.binormal, self.origin)
    }

    pub const DEFAULT: Self = Self::new(Float3::RIGHT, Float3::UP, Float3::FORWARD, Float3::ZERO);
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}
