use tracing::{debug, warn};

use super::camera::{CameraMode, CameraPose};
use super::state::{sample_frame, BeadState, SimulationState};
use crate::sim::{Float3, Frame, Matrix4, Phase, PhaseInputs};
use crate::track::{step, Track};

/// What the renderer draws for one tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    /// Cart model matrix built from `frame`.
    pub pose: Matrix4,
    pub frame: Frame,
    pub bead: Float3,
    pub phase: Phase,
    pub velocity: f32,
    /// Present only in [`CameraMode::FollowBead`].
    pub camera: Option<CameraPose>,
}

/// Advances the ride by one frame of length `dt` seconds.
///
/// Order within a tick: phase transition, velocity law, arc-length step,
/// frame estimate. Per-tick degeneracies never abort the ride; the bead or
/// its orientation is held for this tick instead.
pub fn tick(state: &mut SimulationState, dt: f32, track: &Track) -> RenderRequest {
    let curve = &track.curve;
    let params = &track.params;

    let inputs = PhaseInputs {
        bead_y: state.bead.position.y,
        crest_y: curve.crest().y,
        index: state.bead.index,
        sample_to_end: curve.point(state.bead.index).distance(curve.last()),
        bead_to_end: state.bead.position.distance(curve.last()),
    };

    if let Some(transition) = state.controller.update(&inputs, params) {
        debug!(
            from = ?transition.from,
            to = ?transition.to,
            index = state.bead.index.get(),
            "phase transition"
        );
    }

    let velocity = state.controller.velocity(&inputs, params);
    state.velocity = match step(curve, state.bead.position, state.bead.index, velocity * dt) {
        Ok(next) => {
            state.bead = BeadState {
                position: next.position,
                index: next.index,
            };
            velocity
        }
        Err(err) => {
            warn!(%err, index = state.bead.index.get(), "holding bead in place");
            0.0
        }
    };

    match sample_frame(
        curve,
        state.bead.position,
        state.bead.index,
        params.frame_lookahead,
        params.gravity,
    ) {
        Ok(frame) => state.frame = frame,
        Err(err) => {
            warn!(%err, index = state.bead.index.get(), "reusing previous frame");
            state.held_frames += 1;
            state.frame = state.frame.with_origin(state.bead.position);
        }
    }

    state.ticks += 1;

    RenderRequest {
        pose: state.frame.to_pose(),
        frame: state.frame,
        bead: state.bead.position,
        phase: state.controller.phase(),
        velocity: state.velocity,
        camera: match state.camera_mode {
            CameraMode::Free => None,
            CameraMode::FollowBead => Some(CameraPose::from_frame(&state.frame)),
        },
    }
}
