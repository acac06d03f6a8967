//! World collaborator interface and the default planar implementation.
//!
//! The planner only ever talks to a [`World`]: something that can hand
//! out uniformly sampled collision-free poses and answer whether a
//! straight segment between two poses stays in free space. The
//! [`PlanarWorld`] in this module backs those capabilities with a
//! polygonal region model; any other obstacle representation can plug
//! in by implementing the trait.

mod planar;
mod polygon;
mod region;

pub use planar::{PlanarWorld, PlanarWorldConfig};
pub use polygon::{Polygon2D, Segment2D};
pub use region::PlanarRegion;

use thiserror::Error;

use crate::core::Pose2D;

/// Errors surfaced by a world implementation.
///
/// Any of these is fatal to the in-progress `plan()` call.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The free-space sampler gave up after the configured number of
    /// rejection attempts, typically because free space is empty or
    /// vanishingly small.
    #[error("no collision-free pose found after {attempts} sampling attempts")]
    FreeSpaceExhausted {
        /// Number of rejection attempts made.
        attempts: usize,
    },

    /// The region geometry cannot support sampling or collision checks.
    #[error("degenerate region: {0}")]
    DegenerateRegion(String),
}

/// Obstacle/world model consumed by the planner and search graphs.
///
/// The world is treated as immutable for the duration of a `plan()`
/// call; only the sampler may carry internal mutable state (its RNG).
pub trait World {
    /// Draw a pose uniformly from the currently collision-free region.
    ///
    /// # Errors
    /// Implementations must report an error rather than loop forever
    /// when no free pose can be found.
    fn sample_free_pose_uniform(&mut self) -> Result<Pose2D, WorldError>;

    /// Check whether a single pose lies in free space.
    fn is_pose_collision_free(&self, pose: Pose2D) -> Result<bool, WorldError>;

    /// Check whether the straight segment between two poses stays in
    /// free space.
    fn is_path_collision_free(&self, from: Pose2D, to: Pose2D) -> Result<bool, WorldError>;
}
