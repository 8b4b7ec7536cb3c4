//! beadtrack - bead-on-a-wire coaster ride along a subdivided closed curve.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **sim**: Physics/math primitives (Float3, Frame, Curvature, phase controller)
//! - **track**: Curve building, arc-length stepping, rails
//! - **ride**: Per-frame state, tick, render loop
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use beadtrack::{track::DEMO_LOOP, SimulationParams, SimulationState, Track};
//!
//! let track = Track::build(&DEMO_LOOP, SimulationParams::default())?;
//! let mut state = SimulationState::new(&track);
//! let request = beadtrack::tick(&mut state, track.params.dt(), &track);
//! ```
//!
//! For C hosts, link the cdylib and use the `bead_*` FFI functions.

pub mod error;
pub mod ride;
pub mod sim;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use error::{TrackError, TrackResult};
pub use ride::{run, tick, CameraMode, RenderRequest, Renderer, SimulationState};
pub use sim::{Float3, Frame, Matrix4, Phase, SimulationParams};
pub use track::{SampledCurve, Track};
