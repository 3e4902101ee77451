use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::control::PdController;
use crate::mission::Mission;
use crate::sim::Trajectory;

/// Summary statistics computed from a closed-loop run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub kp: f64,
    pub kd: f64,
    pub rms_error: f64,
    pub max_abs_error: f64,
    pub cave_violations: usize,
    pub first_violation: Option<usize>,
    pub final_depth: Option<f64>,
}

impl RunSummary {
    pub fn from_run(controller: &PdController, mission: &Mission, trajectory: &Trajectory) -> Self {
        let violations = trajectory.cave_violations(mission);
        RunSummary {
            steps: trajectory.len(),
            kp: controller.kp(),
            kd: controller.kd(),
            rms_error: trajectory.rms_error(mission),
            max_abs_error: trajectory.max_abs_error(mission),
            cave_violations: violations.len(),
            first_violation: violations.first().copied(),
            final_depth: trajectory.positions.last().map(|p| p.y),
        }
    }
}

/// Write run summary as pretty JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

/// Write run summary JSON to a file.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &RunSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn summary_counts_violations() {
        let mission = Mission::new(vec![0.0; 3], vec![1.0; 3], vec![-1.0; 3]).unwrap();
        let traj = Trajectory {
            positions: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 1.5),
                Vector2::new(2.0, -3.0),
            ],
            actions: vec![0.0; 3],
        };
        let s = RunSummary::from_run(&PdController::default(), &mission, &traj);
        assert_eq!(s.steps, 3);
        assert_eq!(s.cave_violations, 2);
        assert_eq!(s.first_violation, Some(1));
        assert_eq!(s.final_depth, Some(-3.0));
        assert!((s.max_abs_error - 3.0).abs() < 1e-12);
    }

    #[test]
    fn json_output_is_valid() {
        let mission = Mission::new(vec![0.0], vec![1.0], vec![-1.0]).unwrap();
        let traj = Trajectory {
            positions: vec![Vector2::new(0.0, 0.0)],
            actions: vec![0.0],
        };
        let summary = RunSummary::from_run(&PdController::new(0.2, 0.5), &mission, &traj);

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["kp"], 0.2);
        assert_eq!(value["cave_violations"], 0);
        assert!(value["first_violation"].is_null());
    }
}
