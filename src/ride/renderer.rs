use tracing::info;

use super::state::SimulationState;
use super::tick::{tick, RenderRequest};
use crate::track::Track;

/// Host-side drawing surface.
pub trait Renderer {
    /// Draws one tick's request. Called after the physics update of that tick.
    fn submit(&mut self, request: &RenderRequest);

    /// Polled before every tick; the ride ends once this returns `true`.
    fn close_requested(&self) -> bool;
}

/// Drives ticks at the track's frame rate until the renderer asks to close.
///
/// Returns the number of ticks run.
pub fn run<R: Renderer + ?Sized>(
    track: &Track,
    state: &mut SimulationState,
    renderer: &mut R,
) -> u64 {
    let dt = track.params.dt();
    let mut frames = 0;

    while !renderer.close_requested() {
        let request = tick(state, dt, track);
        renderer.submit(&request);
        frames += 1;
    }

    info!(frames, held_frames = state.held_frames(), "ride finished");
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Phase, SimulationParams};
    use crate::track::DEMO_LOOP;

    struct Recorder {
        requests: Vec<RenderRequest>,
        limit: usize,
    }

    impl Renderer for Recorder {
        fn submit(&mut self, request: &RenderRequest) {
            self.requests.push(*request);
        }

        fn close_requested(&self) -> bool {
            self.requests.len() >= self.limit
        }
    }

    #[test]
    fn runs_until_close_requested() {
        let track = Track::build(&DEMO_LOOP, SimulationParams::default()).unwrap();
        let mut state = SimulationState::new(&track);
        let mut recorder = Recorder {
            requests: Vec::new(),
            limit: 30,
        };

        let frames = run(&track, &mut state, &mut recorder);

        assert_eq!(frames, 30);
        assert_eq!(recorder.requests.len(), 30);
        assert_eq!(state.ticks(), 30);
        assert_eq!(recorder.requests[0].phase, Phase::FreeFall);
    }

    #[test]
    fn closed_renderer_runs_no_ticks() {
        let track = Track::build(&DEMO_LOOP, SimulationParams::default()).unwrap();
        let mut state = SimulationState::new(&track);
        let mut recorder = Recorder {
            requests: Vec::new(),
            limit: 0,
        };

        assert_eq!(run(&track, &mut state, &mut recorder), 0);
        assert_eq!(state.ticks(), 0);
    }

    #[test]
    fn works_through_trait_object() {
        let track = Track::build(&DEMO_LOOP, SimulationParams::default()).unwrap();
        let mut state = SimulationState::new(&track);
        let mut recorder = Recorder {
            requests: Vec::new(),
            limit: 3,
        };
        let renderer: &mut dyn Renderer = &mut recorder;

        assert_eq!(run(&track, &mut state, renderer), 3);
    }
}
