use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one simulation run.
///
/// Durations are in seconds. Any field missing from a scenario file falls back
/// to [`Config::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum separation between two consecutive arrivals.
    pub t_guard: f64,
    /// Probability that an arriving aircraft is delayed.
    pub p_delay: f64,
    /// Gamma scale of the delay magnitude (shape 3).
    pub u_delay: f64,
    /// Gamma scale of the turnaround duration (shape 7).
    pub u_turnaround: f64,
    /// Simulation horizon.
    pub sim_time: f64,
    /// Number of interchangeable runway units.
    pub num_airstrips: usize,
    pub landing_time: f64,
    pub takeoff_time: f64,
    pub seed: u64,
    /// Generate the arrival stream only, without aircraft or runway contention.
    pub arrivals_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            t_guard: 60.0,
            p_delay: 0.1,
            u_delay: 500.0,
            u_turnaround: 45.0 * 60.0,
            sim_time: 24.0 * 60.0 * 60.0,
            num_airstrips: 2,
            landing_time: 60.0,
            takeoff_time: 60.0,
            seed: 42,
            arrivals_only: false,
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.t_guard.is_finite() || self.t_guard < 0.0 {
            return Err(ConfigError::invalid(
                "t_guard",
                format!("must be a finite non-negative number, got {}", self.t_guard),
            ));
        }
        if !(0.0..=1.0).contains(&self.p_delay) {
            return Err(ConfigError::invalid(
                "p_delay",
                format!("must be a probability in [0, 1], got {}", self.p_delay),
            ));
        }
        [
            ("u_delay", self.u_delay),
            ("u_turnaround", self.u_turnaround),
            ("sim_time", self.sim_time),
            ("landing_time", self.landing_time),
            ("takeoff_time", self.takeoff_time),
        ]
        .into_iter()
        .try_for_each(|(field, value)| Self::require_positive(field, value))?;

        if self.num_airstrips == 0 {
            return Err(ConfigError::invalid(
                "num_airstrips",
                "runway capacity must be at least 1",
            ));
        }
        Ok(())
    }

    fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                field,
                format!("must be a finite positive number, got {}", value),
            ))
        }
    }
}
