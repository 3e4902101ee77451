use std::f64::consts::TAU;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("failed to read mission CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("mission is missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: invalid value in column `{column}`")]
    Parse { line: usize, column: &'static str },

    #[error("mission series differ in length (reference {reference}, cave_height {cave_height}, cave_depth {cave_depth})")]
    LengthMismatch {
        reference: usize,
        cave_height: usize,
        cave_depth: usize,
    },
}

// ---------------------------------------------------------------------------
// Mission: reference depth and cave bounds, one sample per step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    reference: Vec<f64>,
    cave_height: Vec<f64>, // upper bound on depth coordinate
    cave_depth: Vec<f64>,  // lower bound on depth coordinate
}

impl Mission {
    pub fn new(
        reference: Vec<f64>,
        cave_height: Vec<f64>,
        cave_depth: Vec<f64>,
    ) -> Result<Self, MissionError> {
        if reference.len() != cave_height.len() || reference.len() != cave_depth.len() {
            return Err(MissionError::LengthMismatch {
                reference: reference.len(),
                cave_height: cave_height.len(),
                cave_depth: cave_depth.len(),
            });
        }
        Ok(Self { reference, cave_height, cave_depth })
    }

    /// Parse a mission from CSV with a header naming `reference`,
    /// `cave_height` and `cave_depth`. Column order is free and extra
    /// columns are ignored.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, MissionError> {
        const COLUMNS: [&str; 3] = ["reference", "cave_height", "cave_depth"];

        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();
        let mut idx = [0usize; 3];
        for (slot, col) in idx.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == col)
                .ok_or(MissionError::MissingColumn(col))?;
        }

        let mut series: [Vec<f64>; 3] = Default::default();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            for ((values, &col_idx), col) in series.iter_mut().zip(&idx).zip(COLUMNS) {
                let value = record
                    .get(col_idx)
                    .and_then(|f| f.parse::<f64>().ok())
                    .ok_or(MissionError::Parse { line, column: col })?;
                values.push(value);
            }
        }

        let [reference, cave_height, cave_depth] = series;
        Ok(Self { reference, cave_height, cave_depth })
    }

    /// Smooth random reference (sum of three sinusoids) inside a cave of
    /// fixed half-width `scale / 2`.
    pub fn random<R: Rng + ?Sized>(duration: usize, scale: f64, rng: &mut R) -> Self {
        let components: Vec<(f64, f64, f64)> = (1..=3)
            .map(|k| {
                let amp = rng.random_range(0.2..1.0) / k as f64;
                let freq = k as f64 + rng.random_range(0.0..1.0);
                let phase = rng.random_range(0.0..TAU);
                (amp, freq, phase)
            })
            .collect();

        let reference: Vec<f64> = (0..duration)
            .map(|t| {
                let s = t as f64 / duration.max(1) as f64;
                scale * components
                    .iter()
                    .map(|(a, f, p)| a * (TAU * f * s + p).sin())
                    .sum::<f64>()
            })
            .collect();

        with_cave(reference, scale / 2.0)
    }

    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    pub fn cave_height(&self) -> &[f64] {
        &self.cave_height
    }

    pub fn cave_depth(&self) -> &[f64] {
        &self.cave_depth
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Number of simulated steps the mission spans.
    pub fn duration(&self) -> usize {
        self.len()
    }

    /// Whether `depth` at step `t` lies inside the cave.
    pub fn in_cave(&self, t: usize, depth: f64) -> bool {
        depth <= self.cave_height[t] && depth >= self.cave_depth[t]
    }
}

fn with_cave(reference: Vec<f64>, half_width: f64) -> Mission {
    let cave_height = reference.iter().map(|r| r + half_width).collect();
    let cave_depth = reference.iter().map(|r| r - half_width).collect();
    Mission { reference, cave_height, cave_depth }
}

// ---------------------------------------------------------------------------
// Preset missions
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Slow sinusoidal dive profile, 20 units peak to peak.
    pub fn sine_dive(duration: usize) -> Mission {
        let reference = (0..duration)
            .map(|t| -10.0 + 10.0 * (TAU * t as f64 / duration.max(1) as f64).cos())
            .collect();
        with_cave(reference, 5.0)
    }

    /// Single step from the surface to depth -5.
    pub fn step(duration: usize) -> Mission {
        let reference = (0..duration)
            .map(|t| if t < duration / 10 { 0.0 } else { -5.0 })
            .collect();
        with_cave(reference, 3.0)
    }
}
