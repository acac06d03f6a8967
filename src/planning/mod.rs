//! Sampling-based planning: configuration, planner, and result types.

mod config;
mod planner;
mod types;

pub use config::{ConfigError, RrtConfig};
pub use planner::RrtPlanner;
pub use types::{PlanFailure, PlanResult};
