use super::math::Float3;
use super::physics;

/// Three-point curvature estimate.
///
/// Fits the circle through `prev`, `current`, `future` using the sagitta-like
/// second difference `x` and the half chord `c`: `r = (x² + c²) / 2x`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curvature {
    /// Half the magnitude of the second difference.
    pub x: f32,
    /// Half the chord from `prev` to `future`.
    pub c: f32,
    /// Circumscribed radius; infinite on straight track.
    pub radius: f32,
    /// `1 / radius`; zero on straight track.
    pub k: f32,
    /// Unit vector toward the centre of curvature; zero on straight track.
    pub toward_center: Float3,
}

impl Curvature {
    pub const fn new(x: f32, c: f32, radius: f32, k: f32, toward_center: Float3) -> Self {
        Self {
            x,
            c,
            radius,
            k,
            toward_center,
        }
    }

    pub fn from_points(prev: Float3, current: Float3, future: Float3) -> Self {
        let second = future - current * 2.0 + prev;
        let x = 0.5 * second.magnitude();
        let c = 0.5 * future.distance(prev);

        if x.is_nan() || x < physics::CURVATURE_EPSILON {
            return Self::new(x, c, f32::INFINITY, 0.0, Float3::ZERO);
        }

        let radius = (x * x + c * c) / (2.0 * x);
        let toward_center = second.normalize();
        Self::new(x, c, radius, 1.0 / radius, toward_center)
    }

    /// True when the points are collinear to within `CURVATURE_EPSILON`.
    pub fn is_flat(&self) -> bool {
        self.k == 0.0
    }

    /// Centripetal acceleration vector `k · n`.
    pub fn perpendicular_acceleration(&self) -> Float3 {
        self.toward_center * self.k
    }

    pub const FLAT: Self = Self::new(0.0, 0.0, f32::INFINITY, 0.0, Float3::ZERO);
}

impl Default for Curvature {
    fn default() -> Self {
        Self::FLAT
    }
}
