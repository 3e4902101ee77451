use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::control::pd::{PdController, DEFAULT_KD, DEFAULT_KP};
use crate::plant::SubmarineParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("sim.disturbance_std must be finite and non-negative, got {0}")]
    DisturbanceStd(f64),
}

// ---------------------------------------------------------------------------
// Run configuration (TOML, every field optional)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub kp: f64,
    pub kd: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self { kp: DEFAULT_KP, kd: DEFAULT_KD }
    }
}

impl ControllerConfig {
    pub fn build(&self) -> PdController {
        PdController::new(self.kp, self.kd)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub duration: usize,      // steps, used when no mission file is given
    pub disturbance_std: f64, // 0 disables disturbances
    pub seed: Option<u64>,
    pub random_mission: bool,
    pub mission_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration: 100,
            disturbance_std: 0.5,
            seed: None,
            random_mission: false,
            mission_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub controller: ControllerConfig,
    pub submarine: SubmarineParams,
    pub sim: SimConfig,
}

impl RunConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let std = self.sim.disturbance_std;
        if !std.is_finite() || std < 0.0 {
            return Err(ConfigError::DisturbanceStd(std));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = RunConfig::from_toml("").unwrap();
        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.controller.build(), PdController::default());
    }

    #[test]
    fn partial_sections_override() {
        let cfg = RunConfig::from_toml(
            r#"
            [controller]
            kd = 1.2

            [submarine]
            drag = 0.3

            [sim]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(cfg.controller.kp, DEFAULT_KP);
        assert_eq!(cfg.controller.kd, 1.2);
        assert_eq!(cfg.submarine.drag, 0.3);
        assert_eq!(cfg.submarine.mass, 1.0);
        assert_eq!(cfg.sim.seed, Some(42));
        assert_eq!(cfg.sim.duration, 100);
    }

    #[test]
    fn bad_disturbance_std_is_rejected() {
        for value in ["-0.5", "nan", "inf"] {
            let text = format!("[sim]\ndisturbance_std = {value}\n");
            let err = RunConfig::from_toml(&text).unwrap_err();
            assert!(matches!(err, ConfigError::DisturbanceStd(_)), "{value}: {err}");
        }
        assert!(RunConfig::from_toml("[sim]\ndisturbance_std = 0.0\n").is_ok());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = RunConfig::from_toml("[controller]\nkp = \"high\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
