use super::camera::CameraMode;
use crate::error::TrackResult;
use crate::sim::{CyclicIndex, Float3, Frame, Phase, PhaseController};
use crate::track::{SampledCurve, Track};

/// Where the bead is on the wire.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BeadState {
    pub position: Float3,
    /// Resumption hint for the arc-length walk.
    pub index: CyclicIndex,
}

/// Everything a ride mutates between ticks.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bead: BeadState,
    pub camera_mode: CameraMode,
    pub(crate) controller: PhaseController,
    pub(crate) frame: Frame,
    pub(crate) velocity: f32,
    pub(crate) ticks: u64,
    pub(crate) held_frames: u64,
}

impl SimulationState {
    /// Places the bead on the crest, the highest sample of the track.
    pub fn new(track: &Track) -> Self {
        Self::at_index(track, track.curve.crest_index())
    }

    /// Places the bead on sample `raw`.
    ///
    /// # Errors
    /// [`crate::TrackError::IndexOutOfRange`] if `raw` is not a sample index.
    pub fn start_at(track: &Track, raw: usize) -> TrackResult<Self> {
        let index = track.curve.try_index(raw)?;
        Ok(Self::at_index(track, index))
    }

    fn at_index(track: &Track, index: CyclicIndex) -> Self {
        let position = track.curve.point(index);
        let frame = sample_frame(
            &track.curve,
            position,
            index,
            track.params.frame_lookahead,
            track.params.gravity,
        )
        .unwrap_or_else(|_| Frame::DEFAULT.with_origin(position));

        Self {
            bead: BeadState { position, index },
            camera_mode: CameraMode::default(),
            controller: PhaseController::new(&track.params),
            frame,
            velocity: 0.0,
            ticks: 0,
            held_frames: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Speed used on the last tick.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Last valid ride frame.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks that reused the previous orientation after a degenerate frame.
    pub fn held_frames(&self) -> u64 {
        self.held_frames
    }

    pub fn toggle_camera(&mut self) {
        self.camera_mode = self.camera_mode.toggled();
    }
}

/// Frame at `position` from the samples `lookahead` behind and ahead of it,
/// counted over distinct samples so the closing duplicate is not double-counted.
pub(crate) fn sample_frame(
    curve: &SampledCurve,
    position: Float3,
    index: CyclicIndex,
    lookahead: usize,
    external_acceleration: Float3,
) -> TrackResult<Frame> {
    let reach = lookahead.max(1) as isize;
    Frame::estimate(
        curve.point(curve.offset_distinct(index, -reach)),
        position,
        curve.point(curve.offset_distinct(index, reach)),
        external_acceleration,
    )
}
