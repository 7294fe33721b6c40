use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::grid::Cell;

/// Simulated time credited per update call under deterministic pacing
pub const SYNTHETIC_FRAME_SECS: f64 = 1.0 / 60.0;

/// Fastest accepted snake speed, in cells per second
pub const MAX_SPEED: f64 = 1000.0;

/// How the simulation clock advances on each update call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Credit a constant 1/60 s per call, ignoring the caller's elapsed time.
    /// Gameplay then depends only on the sequence of inputs, so recordings
    /// replay exactly.
    #[default]
    Deterministic,
    /// Credit the caller-supplied elapsed time
    RealTime,
}

impl Pacing {
    /// Seconds to bank for one update call
    pub fn credit(&self, elapsed_secs: f64) -> f64 {
        match self {
            Pacing::Deterministic => SYNTHETIC_FRAME_SECS,
            Pacing::RealTime => elapsed_secs.max(0.0),
        }
    }
}

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Snake speed in cells per second
    pub speed: f64,
    /// Clock policy
    pub pacing: Pacing,
    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Viewport width in pixels
    pub viewport_width: f64,
    /// Viewport height in pixels
    pub viewport_height: f64,
    /// Length of a freshly reset snake
    pub initial_length: usize,
    /// Tail cell of a freshly reset snake; the body extends to the right
    pub start_cell: Cell,
    /// Segments owed to the snake per food eaten
    pub growth_bonus: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            pacing: Pacing::Deterministic,
            seed: None,
            viewport_width: 800.0,
            viewport_height: 600.0,
            initial_length: 10,
            start_cell: Cell::new(10, 10),
            growth_bonus: 10,
        }
    }
}

impl SimConfig {
    /// Create a configuration with a fixed food seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(format!("speed must be positive, got {}", self.speed));
        }
        if self.speed > MAX_SPEED {
            return Err(format!(
                "speed must be at most {MAX_SPEED}, got {}",
                self.speed
            ));
        }

        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            return Err(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            ));
        }

        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(format!(
                "viewport_height must be positive, got {}",
                self.viewport_height
            ));
        }

        if self.initial_length == 0 {
            return Err("initial_length must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.speed, 15.0);
        assert_eq!(config.pacing, Pacing::Deterministic);
        assert_eq!(config.viewport_width, 800.0);
        assert_eq!(config.viewport_height, 600.0);
        assert_eq!(config.initial_length, 10);
        assert_eq!(config.growth_bonus, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pacing_credit() {
        assert_eq!(Pacing::Deterministic.credit(0.5), SYNTHETIC_FRAME_SECS);
        assert_eq!(Pacing::RealTime.credit(0.5), 0.5);
        assert_eq!(Pacing::RealTime.credit(-1.0), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimConfig {
            speed: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            speed: 1e12,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            speed: MAX_SPEED,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = SimConfig {
            viewport_height: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            initial_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "speed": 8.0, "pacing": "real_time", "seed": 7 }}"#).unwrap();

        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.pacing, Pacing::RealTime);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.viewport_width, 800.0);
    }
}
