//! Error types for marga-plan.

use thiserror::Error;

use crate::world::WorldError;

/// Planner error type.
///
/// Only world failures abort a planning call; running out of budget is
/// reported through [`crate::planning::PlanResult`] instead.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The world collaborator failed.
    #[error("world error: {0}")]
    World(#[from] WorldError),
}

/// Convenience result alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;
