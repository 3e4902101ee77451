use std::io::{self, Write};
use std::path::Path;

use crate::mission::Mission;
use crate::sim::Trajectory;

/// Write a closed-loop run to CSV format.
///
/// Columns: step, x, depth, reference, cave_height, cave_depth, action
pub fn write_trajectory<W: Write>(
    writer: &mut W,
    trajectory: &Trajectory,
    mission: &Mission,
) -> io::Result<()> {
    writeln!(writer, "step,x,depth,reference,cave_height,cave_depth,action")?;

    let rows = trajectory.positions.iter().zip(&trajectory.actions).take(mission.len());
    for (t, (pos, action)) in rows.enumerate() {
        writeln!(
            writer,
            "{},{:.4},{:.6},{:.6},{:.6},{:.6},{:.6}",
            t,
            pos.x,
            pos.y,
            mission.reference()[t],
            mission.cave_height()[t],
            mission.cave_depth()[t],
            action,
        )?;
    }

    Ok(())
}

/// Write a run to a CSV file at the given path.
pub fn write_trajectory_file(
    path: impl AsRef<Path>,
    trajectory: &Trajectory,
    mission: &Mission,
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory, mission)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn csv_output_has_header_and_rows() {
        let mission = Mission::new(vec![0.0, -1.0], vec![1.0, 0.0], vec![-1.0, -2.0]).unwrap();
        let traj = Trajectory {
            positions: vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, -0.25)],
            actions: vec![0.0, -0.5],
        };

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj, &mission).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("step,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[2], "1,1.0000,-0.250000,-1.000000,0.000000,-2.000000,-0.500000");
    }
}
