//! Planning result types.

use std::time::Duration;

use crate::core::Pose2D;

/// Result of one planning call.
///
/// `success` is authoritative: a failed search carries an empty path
/// and a [`PlanFailure`], never a partial path that silently fails to
/// join start and goal.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Waypoints from start to goal (empty on failure).
    pub path: Vec<Pose2D>,
    /// Total path length in meters (infinite on failure).
    pub cost: f32,
    /// Number of configurations sampled.
    pub nodes_sampled: usize,
    /// Number of rewires performed.
    pub rewire_count: usize,
    /// Wall-clock time spent planning.
    pub planning_time: Duration,
    /// Whether start and goal were joined.
    pub success: bool,
    /// Reason for failure (if any).
    pub failure_reason: Option<PlanFailure>,
}

impl PlanResult {
    /// Create a failed result.
    pub(crate) fn failed(
        reason: PlanFailure,
        nodes_sampled: usize,
        rewire_count: usize,
        planning_time: Duration,
    ) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            nodes_sampled,
            rewire_count,
            planning_time,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Number of waypoints in the path.
    pub fn waypoint_count(&self) -> usize {
        self.path.len()
    }

    /// Path length in meters computed from the waypoints.
    pub fn length_meters(&self) -> f32 {
        if self.path.len() < 2 {
            return 0.0;
        }
        self.path
            .windows(2)
            .map(|w| w[0].linear_distance(w[1]))
            .sum()
    }
}

/// Reason a planning call gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanFailure {
    /// Wall-clock budget was exceeded before the trees linked.
    TimeBudgetExceeded,
    /// Sample-count budget was exceeded before the trees linked.
    SampleBudgetExceeded,
}
