//! # Marga-Plan: Sampling-Based 2D Motion Planning
//!
//! A motion planning library for robots moving through a 2D
//! configuration space with polygonal obstacles. The planner
//! incrementally builds one or two exploration trees by drawing random
//! reachable configurations, connecting each to its nearest explored
//! configuration when the connecting segment is obstacle-free, and
//! stitching the trees together once start and goal become mutually
//! reachable.
//!
//! ## Features
//!
//! - **RRT family in one loop**: plain tree growth, greedy "connect"
//!   extension (RRT-Connect), and cost-aware rewiring (RRT*), freely
//!   combinable with bidirectional search
//! - **Arena-backed trees**: stable integer handles keep node identity
//!   separate from pose values and make rewiring cycle-free
//! - **Pluggable worlds**: the planner only depends on the [`World`]
//!   trait; a polygonal [`world::PlanarWorld`] ships as the default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_plan::core::{Point2D, Pose2D};
//! use marga_plan::planning::{RrtConfig, RrtPlanner};
//! use marga_plan::world::{PlanarRegion, PlanarWorld, PlanarWorldConfig, Polygon2D};
//!
//! // A 10x10 room with a robot radius of 0.2m
//! let boundary = Polygon2D::rectangle(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0));
//! let region = PlanarRegion::new(boundary, 0.2);
//! let mut world = PlanarWorld::new(region, PlanarWorldConfig::default());
//!
//! let config = RrtConfig::with_modes(false, true, false);
//! let mut planner = RrtPlanner::new(&mut world, config);
//!
//! let result = planner.plan(Pose2D::new(1.0, 1.0, 0.0), Pose2D::new(9.0, 9.0, 0.0))?;
//! if result.success {
//!     println!("path: {} waypoints, {:.2} m", result.waypoint_count(), result.cost);
//! }
//! # Ok::<(), marga_plan::PlanError>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention: X-forward,
//! Y-left, counter-clockwise positive rotation, meters and radians.
//! The planner's metric is purely linear; headings ride along as
//! payload.
//!
//! ## Architecture
//!
//! - [`core`]: fundamental value types (Point2D, Pose2D, angle math)
//! - [`graph`]: search tree storage (Node, Edge, SearchGraph)
//! - [`planning`]: the sampling loop, configuration, and results
//! - [`world`]: the [`World`] capability trait and the polygonal
//!   default implementation
//!
//! A successful search never guarantees an optimal path; the
//! cost-aware mode only improves paths asymptotically within the
//! sampled budget. Budget exhaustion is an explicit, tagged outcome,
//! never a silently invalid path.

pub mod core;
pub mod error;
pub mod graph;
pub mod planning;
pub mod world;

// Re-export main types at crate root
pub use error::{PlanError, Result};
pub use graph::{Edge, Node, NodeId, SearchGraph};
pub use planning::{ConfigError, PlanFailure, PlanResult, RrtConfig, RrtPlanner};
pub use world::{PlanarRegion, PlanarWorld, PlanarWorldConfig, World, WorldError};
