//! Track geometry: control points, the subdivided centreline, arc-length
//! stepping along it, and the offset rails.

mod builder;
mod curve;
mod layout;
mod rails;
mod stepper;

pub mod control_points;

pub use builder::{build_curve, subdivided_len, MAX_SUBDIVISIONS};
pub use control_points::DEMO_LOOP;
pub use curve::SampledCurve;
pub use layout::Track;
pub use rails::{offset_rails, rail_frame, Rails};
pub use stepper::{step, ArcStep};
