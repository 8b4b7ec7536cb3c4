use super::math::Float3;
use super::physics;

/// Tunable constants for track construction and the ride loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParams {
    /// Acceleration felt by the rider at rest, pointing "up". Its magnitude is
    /// the `|g|` used by the velocity laws.
    pub gravity: Float3,
    /// Ticks per second; each tick advances the bead by `v / frame_rate`.
    pub frame_rate: f32,
    /// Subdivision rounds applied to the control polygon.
    pub subdivisions: u32,
    /// Lateral distance from the centreline to each rail.
    pub rail_offset: f32,
    /// Samples behind and ahead of the bead used to estimate its frame.
    pub frame_lookahead: usize,
    /// Free fall begins once the bead rises above `crest.y - crest_margin`.
    pub crest_margin: f32,
    /// Braking begins once free fall passes this fraction of the loop.
    pub decel_start_fraction: f32,
    /// Lifting begins this many samples before the end of the loop.
    pub lift_lead_samples: usize,
    /// Lift speed used until the first braking phase captures one.
    pub lift_velocity: f32,
}

impl SimulationParams {
    pub fn gravity_magnitude(&self) -> f32 {
        self.gravity.magnitude()
    }

    pub fn dt(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: Float3::new(0.0, physics::G, 0.0),
            frame_rate: physics::HZ,
            subdivisions: 4,
            rail_offset: 0.3,
            frame_lookahead: 10,
            crest_margin: 0.5,
            decel_start_fraction: 0.6,
            lift_lead_samples: 12,
            lift_velocity: 1.0,
        }
    }
}
