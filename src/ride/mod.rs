//! The ride: per-frame state, the tick function and the host render loop.
//!
//! - **state**: `SimulationState`, the only data mutated between frames
//! - **tick**: one physics update producing a `RenderRequest`
//! - **camera**: free or bead-following view
//! - **renderer**: host trait and the loop that drives it

mod camera;
mod renderer;
mod state;
mod tick;

pub use camera::{CameraMode, CameraPose};
pub use renderer::{run, Renderer};
pub use state::{BeadState, SimulationState};
pub use tick::{tick, RenderRequest};
