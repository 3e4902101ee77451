use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::control::{ControlError, Controller};
use crate::mission::Mission;
use crate::plant::Submarine;
use super::trajectory::Trajectory;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("controller failed at step {step}: {source}")]
    Control {
        step: usize,
        #[source]
        source: ControlError,
    },

    #[error("disturbance series has {got} samples, mission needs {needed}")]
    DisturbanceLength { got: usize, needed: usize },

    #[error("invalid disturbance standard deviation {0}")]
    DisturbanceStd(f64),
}

// ---------------------------------------------------------------------------
// Single run against any controller
// ---------------------------------------------------------------------------

/// Run `mission` once: at every step record the position, observe depth,
/// compute the action and advance the plant. Plant and controller are reset
/// before the first step.
pub fn simulate_with(
    plant: &mut Submarine,
    controller: &mut dyn Controller,
    mission: &Mission,
    disturbances: &[f64],
) -> Result<Trajectory, SimError> {
    let steps = mission.len();
    if disturbances.len() < steps {
        return Err(SimError::DisturbanceLength { got: disturbances.len(), needed: steps });
    }

    plant.reset();
    controller.reset();
    tracing::info!(controller = controller.name(), steps, "starting mission");

    let mut trajectory = Trajectory::with_capacity(steps);
    for (t, (&reference, &disturbance)) in mission.reference().iter().zip(disturbances).enumerate() {
        trajectory.positions.push(plant.position());

        let depth = plant.depth();
        let action = controller
            .control(reference, depth, plant.dt())
            .map_err(|source| SimError::Control { step: t, source })?;
        trajectory.actions.push(action);

        if !mission.in_cave(t, depth) {
            tracing::debug!(step = t, depth, "outside cave bounds");
        }

        plant.transition(action, disturbance);
    }

    tracing::info!(
        rms_error = trajectory.rms_error(mission),
        violations = trajectory.cave_violations(mission).len(),
        "mission complete"
    );
    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Plant + controller pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClosedLoop<C: Controller> {
    pub plant: Submarine,
    pub controller: C,
}

impl<C: Controller> ClosedLoop<C> {
    pub fn new(plant: Submarine, controller: C) -> Self {
        Self { plant, controller }
    }

    pub fn simulate(&mut self, mission: &Mission, disturbances: &[f64]) -> Result<Trajectory, SimError> {
        simulate_with(&mut self.plant, &mut self.controller, mission, disturbances)
    }

    /// Run without disturbances.
    pub fn simulate_undisturbed(&mut self, mission: &Mission) -> Result<Trajectory, SimError> {
        let disturbances = vec![0.0; mission.len()];
        self.simulate(mission, &disturbances)
    }

    /// Run with zero-mean Gaussian disturbances of standard deviation `std_dev`.
    pub fn simulate_with_random_disturbances<R: Rng + ?Sized>(
        &mut self,
        mission: &Mission,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<Trajectory, SimError> {
        let normal = Normal::new(0.0, std_dev).map_err(|_| SimError::DisturbanceStd(std_dev))?;
        let disturbances: Vec<f64> = (0..mission.len()).map(|_| normal.sample(rng)).collect();
        self.simulate(mission, &disturbances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::PdController;
    use crate::mission::presets;
    use crate::plant::SubmarineBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Controller that never acts.
    struct Idle;

    impl Controller for Idle {
        fn control(&mut self, _r: f64, _y: f64, _dt: f64) -> Result<f64, ControlError> {
            Ok(0.0)
        }
    }

    #[test]
    fn pd_tracks_step_better_than_idle() {
        let mission = presets::step(300);
        let mut pd = ClosedLoop::new(Submarine::default(), PdController::default());
        let mut idle = ClosedLoop::new(Submarine::default(), Idle);

        let t_pd = pd.simulate_undisturbed(&mission).unwrap();
        let t_idle = idle.simulate_undisturbed(&mission).unwrap();

        assert_eq!(t_pd.len(), 300);
        assert!(t_pd.rms_error(&mission) < t_idle.rms_error(&mission));
        let final_depth = t_pd.positions.last().unwrap().y;
        assert!((final_depth - -5.0).abs() < 0.5, "final depth {final_depth}");
    }

    #[test]
    fn first_action_uses_fresh_controller() {
        let mission = Mission::new(vec![1.0; 2], vec![2.0; 2], vec![-2.0; 2]).unwrap();
        let mut cl = ClosedLoop::new(Submarine::default(), PdController::default());
        let traj = cl.simulate_undisturbed(&mission).unwrap();
        assert!((traj.actions[0] - 0.75).abs() < 1e-12);

        // Second run starts from a reset controller and plant
        let again = cl.simulate_undisturbed(&mission).unwrap();
        assert_eq!(traj.actions, again.actions);
    }

    #[test]
    fn short_disturbance_series_rejected() {
        let mission = presets::sine_dive(10);
        let mut cl = ClosedLoop::new(Submarine::default(), PdController::default());
        let err = cl.simulate(&mission, &[0.0; 5]).unwrap_err();
        assert!(matches!(err, SimError::DisturbanceLength { got: 5, needed: 10 }));
    }

    #[test]
    fn invalid_plant_step_surfaces_control_error() {
        let mission = presets::sine_dive(10);
        let plant = SubmarineBuilder::new().dt(0.0).build();
        let mut cl = ClosedLoop::new(plant, PdController::default());
        let err = cl.simulate_undisturbed(&mission).unwrap_err();
        assert!(matches!(err, SimError::Control { step: 0, .. }));
    }

    #[test]
    fn random_disturbances_are_reproducible() {
        let mission = presets::sine_dive(100);
        let mut cl = ClosedLoop::new(Submarine::default(), PdController::default());
        let a = cl
            .simulate_with_random_disturbances(&mission, 0.5, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let b = cl
            .simulate_with_random_disturbances(&mission, 0.5, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(a.actions, b.actions);
    }

    #[test]
    fn negative_std_rejected() {
        let mission = presets::sine_dive(10);
        let mut cl = ClosedLoop::new(Submarine::default(), PdController::default());
        let err = cl
            .simulate_with_random_disturbances(&mission, -1.0, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, SimError::DisturbanceStd(_)));
    }
}
