//! Planner configuration and YAML loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating an [`RrtConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field value fails validation.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value is rejected.
        reason: String,
    },
}

/// RRT planner settings.
///
/// The three mode flags are freely combinable; all off yields plain
/// single-tree RRT.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RrtConfig {
    /// Maximum length of a single tree extension step (meters).
    #[serde(default = "defaults::max_connection_dist")]
    pub max_connection_dist: f32,

    /// Sample-count budget for one planning call.
    #[serde(default = "defaults::max_nodes_sampled")]
    pub max_nodes_sampled: usize,

    /// Wall-clock budget for one planning call (seconds).
    #[serde(default = "defaults::max_time_secs")]
    pub max_time_secs: f32,

    /// Neighborhood radius scanned when rewiring a new node (meters).
    #[serde(default = "defaults::rewire_radius")]
    pub rewire_radius: f32,

    /// Cap on steps taken inside one extend-until-connect call.
    ///
    /// The outer budget is only polled once per sampling iteration, so
    /// the greedy extension loop needs its own bound to terminate.
    #[serde(default = "defaults::max_extend_steps")]
    pub max_extend_steps: usize,

    /// Grow a second tree from the goal and stitch the two together.
    #[serde(default)]
    pub bidirectional: bool,

    /// Greedily extend toward a link target until blocked (RRT-Connect)
    /// instead of a single connection attempt.
    #[serde(default)]
    pub connect_mode: bool,

    /// Rewire each newly inserted node toward cheaper parents (RRT*).
    #[serde(default)]
    pub cost_aware: bool,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_connection_dist: defaults::max_connection_dist(),
            max_nodes_sampled: defaults::max_nodes_sampled(),
            max_time_secs: defaults::max_time_secs(),
            rewire_radius: defaults::rewire_radius(),
            max_extend_steps: defaults::max_extend_steps(),
            bidirectional: false,
            connect_mode: false,
            cost_aware: false,
        }
    }
}

mod defaults {
    pub fn max_connection_dist() -> f32 {
        0.5
    }

    pub fn max_nodes_sampled() -> usize {
        1000
    }

    pub fn max_time_secs() -> f32 {
        5.0
    }

    pub fn rewire_radius() -> f32 {
        1.0
    }

    pub fn max_extend_steps() -> usize {
        64
    }
}

impl RrtConfig {
    /// Create a configuration with the given mode flags and default
    /// numeric settings.
    pub fn with_modes(bidirectional: bool, connect_mode: bool, cost_aware: bool) -> Self {
        Self {
            bidirectional,
            connect_mode,
            cost_aware,
            ..Default::default()
        }
    }

    /// Set the step bound, builder style.
    pub fn with_max_connection_dist(mut self, dist: f32) -> Self {
        self.max_connection_dist = dist;
        self
    }

    /// Set the rewire neighborhood radius, builder style.
    pub fn with_rewire_radius(mut self, radius: f32) -> Self {
        self.rewire_radius = radius;
        self
    }

    /// Set the sampling and time budgets, builder style.
    pub fn with_budget(mut self, max_nodes_sampled: usize, max_time_secs: f32) -> Self {
        self.max_nodes_sampled = max_nodes_sampled;
        self.max_time_secs = max_time_secs;
        self
    }

    /// Validate field values.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for non-positive step bound,
    /// budgets, rewire radius, or extension cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} must be positive", value),
                })
            }
        }

        positive("max_connection_dist", self.max_connection_dist)?;
        positive("max_time_secs", self.max_time_secs)?;
        positive("rewire_radius", self.rewire_radius)?;
        if self.max_nodes_sampled == 0 {
            return Err(ConfigError::Invalid {
                field: "max_nodes_sampled",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_extend_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "max_extend_steps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load and validate a configuration from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load and validate a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}
