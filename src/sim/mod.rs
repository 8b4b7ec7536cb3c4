//! Pure physics/math primitives for the bead simulation.
//!
//! Nothing in here knows about sampled curves; callers hand in points,
//! indices and distances.

mod curvature;
mod cyclic;
mod frame;
mod math;
mod params;
mod phase;

pub mod physics;

pub use curvature::Curvature;
pub use cyclic::CyclicIndex;
pub use frame::Frame;
pub use math::{Float3, Matrix4};
pub use params::SimulationParams;
pub use phase::{Phase, PhaseController, PhaseInputs, PhaseTransition};
pub use physics::{DT, EPSILON, G, HZ};
