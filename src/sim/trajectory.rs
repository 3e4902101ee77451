use nalgebra::Vector2;

use crate::mission::Mission;

// ---------------------------------------------------------------------------
// Closed-loop run record
// ---------------------------------------------------------------------------

/// Plant positions and control actions, one entry per simulated step.
/// `positions[t]` is the state the controller observed at step `t`.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    pub positions: Vec<Vector2<f64>>,
    pub actions: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            actions: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn depths(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().map(|p| p.y)
    }

    /// `reference[t] - depth[t]` for every step.
    pub fn tracking_errors<'a>(&'a self, mission: &'a Mission) -> impl Iterator<Item = f64> + 'a {
        mission.reference().iter().zip(self.depths()).map(|(r, y)| r - y)
    }

    /// Steps at which the vehicle was outside the cave.
    pub fn cave_violations(&self, mission: &Mission) -> Vec<usize> {
        self.depths()
            .enumerate()
            .take(mission.len())
            .filter(|&(t, y)| !mission.in_cave(t, y))
            .map(|(t, _)| t)
            .collect()
    }

    pub fn rms_error(&self, mission: &Mission) -> f64 {
        let n = self.len().min(mission.len());
        if n == 0 {
            return 0.0;
        }
        let sum_sq: f64 = self.tracking_errors(mission).map(|e| e * e).sum();
        (sum_sq / n as f64).sqrt()
    }

    pub fn max_abs_error(&self, mission: &Mission) -> f64 {
        self.tracking_errors(mission).map(f64::abs).fold(0.0_f64, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_mission() -> Mission {
        Mission::new(vec![0.0; 4], vec![1.0; 4], vec![-1.0; 4]).unwrap()
    }

    #[test]
    fn error_statistics() {
        let traj = Trajectory {
            positions: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.5),
                Vector2::new(2.0, -2.0),
                Vector2::new(3.0, 0.0),
            ],
            actions: vec![0.0; 4],
        };
        let m = flat_mission();
        assert!((traj.max_abs_error(&m) - 2.0).abs() < 1e-12);
        assert!((traj.rms_error(&m) - (4.25_f64 / 4.0).sqrt()).abs() < 1e-12);
        assert_eq!(traj.cave_violations(&m), vec![2]);
    }

    #[test]
    fn empty_trajectory() {
        let traj = Trajectory::default();
        let m = flat_mission();
        assert_eq!(traj.rms_error(&m), 0.0);
        assert!(traj.cave_violations(&m).is_empty());
    }
}
