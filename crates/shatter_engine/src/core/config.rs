//! # Engine Configuration
//!
//! Typed configuration for the traversal, simulation and frame timing
//! subsystems. Every section has defaults matching the shipped game tuning,
//! so a config file only needs to list the values it overrides.
//!
//! ```toml
//! [simulation]
//! floor_height = -250.0
//!
//! [traversal]
//! max_depth = 32
//! ```

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Traversal Limits
///
/// Structural bounds applied by the scene walker. Exceeding either is treated
/// as malformed input (too deep, too broad, or cyclic) and aborts the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalLimits {
    /// Maximum number of pending nodes on the explicit frontier stack
    pub max_frontier: usize,
    /// Maximum group nesting depth below the root
    pub max_depth: usize,
}

impl TraversalLimits {
    /// Limits with an explicit frontier capacity
    pub fn with_frontier(mut self, max_frontier: usize) -> Self {
        self.max_frontier = max_frontier;
        self
    }

    /// Limits with an explicit depth bound
    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate the limits
    pub fn validate(&self) -> Result<(), String> {
        if self.max_frontier == 0 {
            return Err("Traversal frontier must hold at least one node".to_string());
        }
        if self.max_depth == 0 {
            return Err("Traversal depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_frontier: 1024,
            max_depth: 64,
        }
    }
}

/// # Particle Simulation Configuration
///
/// Physics constants for exploded triangle fragments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Downward acceleration for regular particles (units/s²)
    pub gravity: f32,
    /// Downward acceleration for `HEAVYGRAVITY` particles (units/s²)
    pub heavy_gravity: f32,
    /// Ground plane used where no terrain height is available
    pub floor_height: f32,
    /// Fraction of vertical speed kept (and inverted) on a bounce
    pub bounce_restitution: f32,
    /// Horizontal speed multiplier applied on a bounce
    pub bounce_friction: f32,
}

impl SimulationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.bounce_restitution) {
            return Err(format!(
                "Bounce restitution must be within [0, 1], got {}",
                self.bounce_restitution
            ));
        }
        if !(0.0..=1.0).contains(&self.bounce_friction) {
            return Err(format!(
                "Bounce friction must be within [0, 1], got {}",
                self.bounce_friction
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 1700.0 / 3.0,
            heavy_gravity: 1700.0 / 2.0,
            floor_height: -100.0,
            bounce_restitution: 0.5,
            bounce_friction: 0.9,
        }
    }
}

/// # Frame Timing Configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame rate assumed before the first measured frame
    pub default_fps: f32,
    /// Slowest frame rate the simulation is allowed to see
    pub min_fps: f32,
}

impl FrameConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_fps <= 0.0 {
            return Err("Minimum FPS must be positive".to_string());
        }
        if self.default_fps < self.min_fps {
            return Err(format!(
                "Default FPS {} is below the minimum {}",
                self.default_fps, self.min_fps
            ));
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            default_fps: 60.0,
            min_fps: 9.0,
        }
    }
}

/// # Engine Configuration
///
/// Root configuration object loaded by applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scene walker limits
    pub traversal: TraversalLimits,
    /// Particle physics
    pub simulation: SimulationConfig,
    /// Frame timing
    pub frame: FrameConfig,
}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.traversal.validate().map_err(ConfigError::Invalid)?;
        self.simulation.validate().map_err(ConfigError::Invalid)?;
        self.frame.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Config for EngineConfig {}
