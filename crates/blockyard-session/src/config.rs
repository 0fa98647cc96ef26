//! Session configuration.

use std::path::Path;

use blockyard_core::{Error, Result};
use blockyard_world::GroundConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tools::SpeedPreset;

/// Base movement speeds per preset, in world units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub normal: f32,
    pub fast: f32,
    pub slow: f32,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            normal: 0.05,
            fast: 0.1,
            slow: 0.02,
        }
    }
}

impl SpeedTable {
    /// Base speed of a preset.
    #[must_use]
    pub const fn speed(&self, preset: SpeedPreset) -> f32 {
        match preset {
            SpeedPreset::Normal => self.normal,
            SpeedPreset::Fast => self.fast,
            SpeedPreset::Slow => self.slow,
        }
    }
}

/// Everything tunable about a sandbox session.
///
/// Partial JSON files are accepted; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial ground layer. Its spacing is the block size of the session.
    pub ground: GroundConfig,
    /// Camera start position.
    pub spawn: Vec3,
    pub speeds: SpeedTable,
    /// Speed factor while sprint is held.
    pub sprint_multiplier: f32,
    /// Fraction of velocity kept after each tick.
    pub damping: f32,
    /// Radians of rotation per unit of pointer motion.
    pub mouse_sensitivity: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ground: GroundConfig::default(),
            spawn: Vec3::new(0.0, 5.0, 0.0),
            speeds: SpeedTable::default(),
            sprint_multiplier: 3.0,
            damping: 0.9,
            mouse_sensitivity: 0.002,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Block edge length and lattice spacing.
    #[must_use]
    pub const fn block_size(&self) -> i32 {
        self.ground.spacing
    }

    /// Set the number of ground blocks per side.
    #[must_use]
    pub const fn with_grid(mut self, grid: i32) -> Self {
        self.ground.grid = grid;
        self
    }

    /// Set the block size.
    #[must_use]
    pub const fn with_block_size(mut self, size: i32) -> Self {
        self.ground.spacing = size;
        self
    }

    #[must_use]
    pub const fn with_spawn(mut self, spawn: Vec3) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub const fn with_speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    #[must_use]
    pub const fn with_sprint_multiplier(mut self, multiplier: f32) -> Self {
        self.sprint_multiplier = multiplier;
        self
    }

    #[must_use]
    pub const fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    #[must_use]
    pub const fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Parse a configuration from JSON and check it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidData(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;
        Self::from_json(&json)
    }

    /// Reject values the session cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.ground.spacing <= 0 {
            return Err(Error::InvalidData(format!(
                "block size must be positive, got {}",
                self.ground.spacing
            )));
        }
        if self.ground.grid < 0 {
            return Err(Error::InvalidData(format!(
                "ground grid must not be negative, got {}",
                self.ground.grid
            )));
        }
        // Damping of 1 or more never lets the camera come to rest.
        if !(0.0..1.0).contains(&self.damping) {
            return Err(Error::InvalidData(format!(
                "damping must be within 0..1, got {}",
                self.damping
            )));
        }

        let rates = [
            ("speeds.normal", self.speeds.normal),
            ("speeds.fast", self.speeds.fast),
            ("speeds.slow", self.speeds.slow),
            ("sprint_multiplier", self.sprint_multiplier),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.mouse_sensitivity.is_finite() {
            return Err(Error::InvalidData(format!(
                "mouse_sensitivity must be finite, got {}",
                self.mouse_sensitivity
            )));
        }
        Ok(())
    }
}
