use super::cyclic::CyclicIndex;
use super::params::SimulationParams;
use super::physics;

/// Motion regime of the cart. Exactly one is active.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Chain lift at constant speed.
    Lifting,
    /// Unpowered run driven by energy conservation from the crest.
    FreeFall,
    /// Brake run, speed ramps down with the remaining distance.
    Decelerating,
}

/// Per-tick observations the controller decides on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhaseInputs {
    /// Current bead height.
    pub bead_y: f32,
    /// Height of the highest curve sample.
    pub crest_y: f32,
    /// Bead's sample index hint.
    pub index: CyclicIndex,
    /// Distance from the sample at `index` to the last curve sample.
    pub sample_to_end: f32,
    /// Distance from the bead to the last curve sample.
    pub bead_to_end: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
}

/// Lift / free-fall / brake state machine.
///
/// Entering free fall is edge-armed: after a free fall ends, the bead must be
/// seen at or below the crest threshold before it can start another one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhaseController {
    phase: Phase,
    decel_velocity: f32,
    decel_distance: f32,
    crest_armed: bool,
    last_index: Option<CyclicIndex>,
}

impl PhaseController {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            phase: Phase::Decelerating,
            decel_velocity: params.lift_velocity,
            decel_distance: 0.0,
            crest_armed: true,
            last_index: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Reference velocity captured when braking last began.
    pub fn decel_velocity(&self) -> f32 {
        self.decel_velocity
    }

    /// Reference distance captured when braking last began.
    pub fn decel_distance(&self) -> f32 {
        self.decel_distance
    }

    /// Applies at most one transition for this tick.
    ///
    /// The lift window counts as reached when the bead is inside it or has
    /// crossed it since the previous update, including by wrapping the seam.
    pub fn update(
        &mut self,
        inputs: &PhaseInputs,
        params: &SimulationParams,
    ) -> Option<PhaseTransition> {
        let threshold = inputs.crest_y - params.crest_margin;
        if inputs.bead_y <= threshold {
            self.crest_armed = true;
        }

        let last_index = self.last_index.replace(inputs.index);
        let from = self.phase;
        let to = match from {
            Phase::FreeFall if inputs.index.fraction() > params.decel_start_fraction => {
                let drop = inputs.crest_y - inputs.bead_y;
                self.decel_velocity =
                    physics::deceleration_reference_velocity(params.gravity_magnitude(), drop);
                self.decel_distance = inputs.sample_to_end;
                self.crest_armed = false;
                Phase::Decelerating
            }
            Phase::Lifting | Phase::Decelerating
                if self.crest_armed && inputs.bead_y > threshold =>
            {
                Phase::FreeFall
            }
            Phase::Decelerating if reached_lift(last_index, inputs.index, params) => {
                Phase::Lifting
            }
            _ => return None,
        };

        self.phase = to;
        Some(PhaseTransition { from, to })
    }

    /// Speed along the track for the active phase.
    pub fn velocity(&self, inputs: &PhaseInputs, params: &SimulationParams) -> f32 {
        match self.phase {
            Phase::FreeFall => physics::free_fall_velocity(
                params.gravity_magnitude(),
                inputs.crest_y - inputs.bead_y,
            ),
            Phase::Decelerating => physics::decelerating_velocity(
                self.decel_velocity,
                inputs.bead_to_end,
                self.decel_distance,
            ),
            Phase::Lifting => self.decel_velocity,
        }
    }
}

fn lift_start(index: CyclicIndex, params: &SimulationParams) -> usize {
    index.period().saturating_sub(params.lift_lead_samples)
}

/// The window runs from `lift_start` to the last sample. A forward path has
/// touched it when either end lies inside it or the path wrapped the seam.
fn reached_lift(
    last: Option<CyclicIndex>,
    index: CyclicIndex,
    params: &SimulationParams,
) -> bool {
    let start = lift_start(index, params);
    if index.get() >= start {
        return true;
    }
    match last {
        Some(last) if last.period() == index.period() => {
            last.get() >= start || index.get() < last.get()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LEN: usize = 100;
    const CREST: f32 = 2.0;

    fn inputs(bead_y: f32, index: usize) -> PhaseInputs {
        PhaseInputs {
            bead_y,
            crest_y: CREST,
            index: CyclicIndex::new(index, LEN),
            sample_to_end: 4.0,
            bead_to_end: 2.0,
        }
    }

    #[test]
    fn starts_decelerating() {
        let controller = PhaseController::new(&SimulationParams::default());
        assert_eq!(controller.phase(), Phase::Decelerating);
        assert_eq!(controller.decel_velocity(), 1.0);
    }

    #[test]
    fn crossing_crest_threshold_enters_free_fall_once() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        let threshold = CREST - params.crest_margin;
        let eps = 1e-4;

        // Start below so the crossing is upward.
        let heights = [
            threshold - eps,
            threshold,
            threshold + eps,
            threshold,
            threshold - eps,
            threshold + eps,
            threshold,
            threshold + eps,
        ];

        let mut entries = 0;
        for &y in &heights {
            if let Some(t) = controller.update(&inputs(y, 10), &params) {
                assert_eq!(t.to, Phase::FreeFall);
                entries += 1;
            }
        }

        assert_eq!(entries, 1);
        assert_eq!(controller.phase(), Phase::FreeFall);
    }

    #[test]
    fn exactly_at_threshold_does_not_enter_free_fall() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        let threshold = CREST - params.crest_margin;

        assert!(controller.update(&inputs(threshold, 10), &params).is_none());
        assert_eq!(controller.phase(), Phase::Decelerating);
    }

    #[test]
    fn free_fall_past_fraction_starts_braking() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        assert_eq!(controller.phase(), Phase::FreeFall);

        assert!(controller.update(&inputs(1.0, 60), &params).is_none());

        let transition = controller.update(&inputs(1.0, 61), &params).unwrap();
        assert_eq!(transition.from, Phase::FreeFall);
        assert_eq!(transition.to, Phase::Decelerating);

        let expected = (2.0 * params.gravity_magnitude() * 1.0 + 1.0).sqrt();
        assert_relative_eq!(controller.decel_velocity(), expected, epsilon = 1e-5);
        assert_eq!(controller.decel_distance(), 4.0);
    }

    #[test]
    fn braking_near_crest_does_not_flap_back_to_free_fall() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        controller.update(&inputs(CREST - 0.1, 70), &params);
        assert_eq!(controller.phase(), Phase::Decelerating);

        // Still above the threshold: stays braking until the bead dips below.
        assert!(controller.update(&inputs(CREST - 0.1, 71), &params).is_none());
        assert_eq!(controller.phase(), Phase::Decelerating);

        controller.update(&inputs(0.0, 72), &params);
        let again = controller.update(&inputs(CREST, 73), &params).unwrap();
        assert_eq!(again.to, Phase::FreeFall);
    }

    #[test]
    fn braking_near_loop_end_starts_lift() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        controller.update(&inputs(0.0, 70), &params);

        assert!(controller.update(&inputs(0.0, LEN - 13), &params).is_none());
        let transition = controller.update(&inputs(0.0, LEN - 12), &params).unwrap();
        assert_eq!(transition.to, Phase::Lifting);
    }

    #[test]
    fn braking_that_wraps_the_seam_still_starts_lift() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        controller.update(&inputs(0.0, 70), &params);
        assert!(controller.update(&inputs(0.0, 80), &params).is_none());

        // One long step carried the bead over the window and past the seam.
        let transition = controller.update(&inputs(0.0, 3), &params).unwrap();
        assert_eq!(transition.from, Phase::Decelerating);
        assert_eq!(transition.to, Phase::Lifting);
    }

    #[test]
    fn braking_entered_inside_the_window_lifts_after_wrapping() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        // Free fall ends already inside the window.
        controller.update(&inputs(0.0, LEN - 2), &params);
        assert_eq!(controller.phase(), Phase::Decelerating);

        let transition = controller.update(&inputs(0.0, 1), &params).unwrap();
        assert_eq!(transition.to, Phase::Lifting);
    }

    #[test]
    fn braking_without_reaching_window_does_not_lift() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        controller.update(&inputs(0.0, 70), &params);

        for index in 71..LEN - 12 {
            assert!(controller.update(&inputs(0.0, index), &params).is_none());
        }
        assert_eq!(controller.phase(), Phase::Decelerating);
    }

    #[test]
    fn lifting_reaches_crest_and_falls() {
        let params = SimulationParams::default();
        let mut controller = PhaseController::new(&params);
        controller.update(&inputs(CREST, 10), &params);
        controller.update(&inputs(0.0, 70), &params);
        controller.update(&inputs(0.0, LEN - 5), &params);
        assert_eq!(controller.phase(), Phase::Lifting);

        assert!(controller.update(&inputs(0.5, 5), &params).is_none());
        let transition = controller.update(&inputs(CREST - 0.2, 20), &params).unwrap();
        assert_eq!(transition.from, Phase::Lifting);
        assert_eq!(transition.to, Phase::FreeFall);
    }

    #[test]
    fn velocity_laws_per_phase() {
        let params = SimulationParams::default();
        let g = params.gravity_magnitude();
        let mut controller = PhaseController::new(&params);

        // Initial braking with no captured distance coasts at lift speed.
        assert_eq!(
            controller.velocity(&inputs(0.0, 50), &params),
            params.lift_velocity
        );

        controller.update(&inputs(CREST, 10), &params);
        let v = controller.velocity(&inputs(0.0, 30), &params);
        assert_relative_eq!(v, (2.0 * g * CREST + 2.0).sqrt(), epsilon = 1e-5);

        controller.update(&inputs(0.0, 70), &params);
        let v_dec = controller.decel_velocity();
        let braking = controller.velocity(&inputs(0.0, 75), &params);
        assert_relative_eq!(braking, v_dec * 2.0 / 4.0, epsilon = 1e-5);

        controller.update(&inputs(0.0, LEN - 1), &params);
        assert_eq!(controller.phase(), Phase::Lifting);
        assert_relative_eq!(controller.velocity(&inputs(0.0, 0), &params), v_dec);
    }
}
