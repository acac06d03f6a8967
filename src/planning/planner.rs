//! RRT planner implementation.
//!
//! Grows one or two search trees by drawing random reachable
//! configurations and connecting each to its nearest already-explored
//! configuration, with optional greedy extension (RRT-Connect) and
//! cost-aware rewiring (RRT*).

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::core::Pose2D;
use crate::error::Result;
use crate::graph::{Node, NodeId, SearchGraph};
use crate::world::{World, WorldError};

use super::config::RrtConfig;
use super::types::{PlanFailure, PlanResult};

/// The pair of nodes where the search trees met.
///
/// `start_node` lives in the start tree; `goal_node` is present in
/// bidirectional mode and lives in the goal tree.
struct LinkPoint {
    start_node: NodeId,
    goal_node: Option<NodeId>,
}

/// Sampling-based motion planner over a [`World`].
///
/// One in-progress `plan()` call exclusively owns both trees; the
/// planner borrows the world for its whole lifetime and never shares
/// it. All per-call state is reset at the start of every call.
pub struct RrtPlanner<'a, W: World> {
    world: &'a mut W,
    config: RrtConfig,
    start_tree: SearchGraph,
    goal_tree: SearchGraph,
    nodes_sampled: usize,
    rewire_count: usize,
    planning_time: Duration,
}

impl<'a, W: World> RrtPlanner<'a, W> {
    /// Create a planner over a world with the given configuration.
    pub fn new(world: &'a mut W, config: RrtConfig) -> Self {
        Self {
            world,
            config,
            start_tree: SearchGraph::new(),
            goal_tree: SearchGraph::new(),
            nodes_sampled: 0,
            rewire_count: 0,
            planning_time: Duration::ZERO,
        }
    }

    /// Create a planner with default numeric settings and the given
    /// mode flags.
    pub fn with_modes(
        world: &'a mut W,
        bidirectional: bool,
        connect_mode: bool,
        cost_aware: bool,
    ) -> Self {
        Self::new(world, RrtConfig::with_modes(bidirectional, connect_mode, cost_aware))
    }

    /// Active configuration.
    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    /// The tree rooted at the last call's start pose.
    pub fn start_tree(&self) -> &SearchGraph {
        &self.start_tree
    }

    /// The tree rooted at the last call's goal pose (empty unless
    /// bidirectional).
    pub fn goal_tree(&self) -> &SearchGraph {
        &self.goal_tree
    }

    /// Number of configurations sampled by the last call.
    pub fn nodes_sampled(&self) -> usize {
        self.nodes_sampled
    }

    /// Number of rewires performed by the last call.
    pub fn rewire_count(&self) -> usize {
        self.rewire_count
    }

    /// Wall-clock time spent by the last call.
    pub fn planning_time(&self) -> Duration {
        self.planning_time
    }

    /// Discard both trees and all counters.
    ///
    /// Safe to invoke at any time; `plan()` performs it implicitly.
    pub fn reset(&mut self) {
        self.start_tree.clear();
        self.goal_tree.clear();
        self.nodes_sampled = 0;
        self.rewire_count = 0;
        self.planning_time = Duration::ZERO;
    }

    /// Search for a path from `start` to `goal`.
    ///
    /// Returns `Ok` with `success = false` when the budget ran out
    /// before the trees linked.
    ///
    /// # Errors
    /// World failures (sampler or collision predicate) abort the call.
    pub fn plan(&mut self, start: Pose2D, goal: Pose2D) -> Result<PlanResult> {
        self.reset();
        trace!(
            "[Rrt] plan: start=({:.2},{:.2}) goal=({:.2},{:.2}) bidirectional={} connect={} cost_aware={}",
            start.x,
            start.y,
            goal.x,
            goal.y,
            self.config.bidirectional,
            self.config.connect_mode,
            self.config.cost_aware
        );

        self.start_tree.insert(Node::root(start));
        if self.config.bidirectional {
            self.goal_tree.insert(Node::root(goal));
        }

        let t_start = Instant::now();
        let outcome = loop {
            // Draw a sample from free space
            let q = self.world.sample_free_pose_uniform()?;
            self.nodes_sampled += 1;

            // Grow each tree toward the same sample
            let inserted_start = grow(&*self.world, &self.config, &mut self.start_tree, q)?;
            let inserted_goal = if self.config.bidirectional {
                grow(&*self.world, &self.config, &mut self.goal_tree, q)?
            } else {
                None
            };

            // Rewire new nodes within their own trees
            if self.config.cost_aware {
                if let Some(id) = inserted_start {
                    if rewire(&*self.world, &self.config, &mut self.start_tree, id)? {
                        self.rewire_count += 1;
                    }
                }
                if let Some(id) = inserted_goal {
                    if rewire(&*self.world, &self.config, &mut self.goal_tree, id)? {
                        self.rewire_count += 1;
                    }
                }
            }

            // Try to link the trees (or reach the fixed goal)
            let link = self.try_link(inserted_start, inserted_goal, goal)?;

            // Budget, polled once per iteration
            self.planning_time = t_start.elapsed();
            if let Some(link) = link {
                break Ok(link);
            }
            if self.planning_time.as_secs_f32() > self.config.max_time_secs {
                break Err(PlanFailure::TimeBudgetExceeded);
            }
            if self.nodes_sampled > self.config.max_nodes_sampled {
                break Err(PlanFailure::SampleBudgetExceeded);
            }
        };

        match outcome {
            Ok(link) => {
                let path = self.extract_path(&link);
                let cost: f32 = path.windows(2).map(|w| w[0].linear_distance(w[1])).sum();
                debug!(
                    "[Rrt] SUCCESS: {} waypoints, cost={:.2}, samples={}, rewires={}",
                    path.len(),
                    cost,
                    self.nodes_sampled,
                    self.rewire_count
                );
                Ok(PlanResult {
                    path,
                    cost,
                    nodes_sampled: self.nodes_sampled,
                    rewire_count: self.rewire_count,
                    planning_time: self.planning_time,
                    success: true,
                    failure_reason: None,
                })
            }
            Err(reason) => {
                debug!(
                    "[Rrt] FAILED: {:?} after {} samples",
                    reason, self.nodes_sampled
                );
                Ok(PlanResult::failed(
                    reason,
                    self.nodes_sampled,
                    self.rewire_count,
                    self.planning_time,
                ))
            }
        }
    }

    /// Attempt to join the trees after this iteration's insertions.
    fn try_link(
        &mut self,
        inserted_start: Option<NodeId>,
        inserted_goal: Option<NodeId>,
        goal: Pose2D,
    ) -> std::result::Result<Option<LinkPoint>, WorldError> {
        if self.config.bidirectional {
            // A node joined the start tree: extend it toward the
            // nearest node of the goal tree.
            if let Some(new_id) = inserted_start {
                let new_pose = self.start_tree.node(new_id).pose;
                if let Some(tgt) = self.goal_tree.nearest_node(new_pose) {
                    let target_pose = self.goal_tree.node(tgt).pose;
                    let (linked, end) = extend_until_connect(
                        &*self.world,
                        &self.config,
                        &mut self.start_tree,
                        new_id,
                        target_pose,
                    )?;
                    if linked {
                        return Ok(Some(LinkPoint {
                            start_node: end,
                            goal_node: Some(tgt),
                        }));
                    }
                }
            }
            // Symmetrically for a node that joined the goal tree.
            if let Some(new_id) = inserted_goal {
                let new_pose = self.goal_tree.node(new_id).pose;
                if let Some(tgt) = self.start_tree.nearest_node(new_pose) {
                    let target_pose = self.start_tree.node(tgt).pose;
                    let (linked, end) = extend_until_connect(
                        &*self.world,
                        &self.config,
                        &mut self.goal_tree,
                        new_id,
                        target_pose,
                    )?;
                    if linked {
                        return Ok(Some(LinkPoint {
                            start_node: tgt,
                            goal_node: Some(end),
                        }));
                    }
                }
            }
            Ok(None)
        } else if let Some(new_id) = inserted_start {
            let (linked, end) = extend_until_connect(
                &*self.world,
                &self.config,
                &mut self.start_tree,
                new_id,
                goal,
            )?;
            Ok(linked.then_some(LinkPoint {
                start_node: end,
                goal_node: None,
            }))
        } else {
            Ok(None)
        }
    }

    /// Back out the path by walking parent chains.
    ///
    /// The start-tree chain is reversed into root-to-connection order;
    /// in bidirectional mode the goal-tree chain is appended as walked,
    /// since it already runs outward from the connection point.
    fn extract_path(&self, link: &LinkPoint) -> Vec<Pose2D> {
        let mut path: Vec<Pose2D> = self
            .start_tree
            .path_to_root(link.start_node)
            .into_iter()
            .map(|id| self.start_tree.node(id).pose)
            .collect();
        path.reverse();

        if let Some(goal_id) = link.goal_node {
            path.extend(
                self.goal_tree
                    .path_to_root(goal_id)
                    .into_iter()
                    .map(|id| self.goal_tree.node(id).pose),
            );
        }
        path
    }
}

/// Step policy: move directly to `to` when within the step bound,
/// otherwise exactly `max_connection_dist` toward it.
///
/// Returns the stepped pose and the step length. A truncated step
/// faces the step direction; a direct step keeps the target heading.
fn step_toward(config: &RrtConfig, from: Pose2D, to: Pose2D) -> (Pose2D, f32) {
    let dist = from.linear_distance(to);
    if dist <= config.max_connection_dist {
        (to, dist)
    } else {
        let theta = from.angle_to(to);
        let pose = Pose2D::new(
            from.x + config.max_connection_dist * theta.cos(),
            from.y + config.max_connection_dist * theta.sin(),
            theta,
        );
        (pose, config.max_connection_dist)
    }
}

/// Grow `graph` one step toward the sample `q`.
///
/// Returns the inserted node, or `None` when the connecting segment
/// was blocked.
fn grow<W: World>(
    world: &W,
    config: &RrtConfig,
    graph: &mut SearchGraph,
    q: Pose2D,
) -> std::result::Result<Option<NodeId>, WorldError> {
    let Some(near) = graph.nearest_node(q) else {
        return Ok(None);
    };
    let (pose, step) = step_toward(config, graph.node(near).pose, q);
    let cost = graph.node(near).cost + step;
    graph.connect(world, near, Node::child(pose, near, cost))
}

/// Rewire a newly inserted node toward the cheapest feasible parent
/// in its neighborhood.
///
/// Scans every node of `graph`; a candidate must be identity-distinct
/// from `n_tgt`, lie within the rewire radius, and offer a strictly
/// lower cost over a collision-free segment. Each candidate's
/// alternative cost is independent of the running best, so the scan
/// converges to the cheapest feasible candidate regardless of order.
/// Descendant costs are not propagated.
fn rewire<W: World>(
    world: &W,
    config: &RrtConfig,
    graph: &mut SearchGraph,
    n_tgt: NodeId,
) -> std::result::Result<bool, WorldError> {
    let tgt_pose = graph.node(n_tgt).pose;
    let mut best_cost = graph.node(n_tgt).cost;
    let mut best_parent = None;

    for id in graph.ids() {
        if id == n_tgt {
            continue;
        }
        let dist = graph.node(id).pose.linear_distance(tgt_pose);
        if dist > config.rewire_radius {
            continue;
        }
        let alt_cost = graph.node(id).cost + dist;
        if alt_cost < best_cost && graph.check_connectivity(world, id, n_tgt)? {
            best_parent = Some(id);
            best_cost = alt_cost;
        }
    }

    if let Some(parent) = best_parent {
        graph.reparent(n_tgt, parent, best_cost);
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Try to connect `from` to a target pose, greedily extending when
/// connect mode is enabled.
///
/// The target enters `graph` as a fresh insertion on success (its cost
/// recomputed for this tree), so bidirectional targets are never
/// shared between arenas. Without connect mode, exactly one
/// connection attempt is made per call. The loop is capped at
/// `max_extend_steps` because the outer budget is only polled between
/// sampling iterations.
fn extend_until_connect<W: World>(
    world: &W,
    config: &RrtConfig,
    graph: &mut SearchGraph,
    from: NodeId,
    target: Pose2D,
) -> std::result::Result<(bool, NodeId), WorldError> {
    let mut curr = from;
    for _ in 0..config.max_extend_steps {
        let curr_pose = graph.node(curr).pose;
        let dist = curr_pose.linear_distance(target);

        // Within reach: try the direct connection
        if dist < config.max_connection_dist {
            let cost = graph.node(curr).cost + dist;
            if let Some(id) = graph.connect(world, curr, Node::child(target, curr, cost))? {
                return Ok((true, id));
            }
        }

        if !config.connect_mode {
            return Ok((false, curr));
        }

        // Keep stepping toward the target until blocked
        let (pose, step) = step_toward(config, curr_pose, target);
        let cost = graph.node(curr).cost + step;
        match graph.connect(world, curr, Node::child(pose, curr, cost))? {
            Some(id) => curr = id,
            None => return Ok((false, curr)),
        }
    }
    Ok((false, curr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use std::cell::Cell;

    /// Scripted world: replays a fixed sample sequence (cycling) and
    /// optionally blocks every segment crossing a vertical wall.
    struct ScriptedWorld {
        samples: Vec<Pose2D>,
        cursor: usize,
        wall_x: Option<f32>,
        path_checks: Cell<usize>,
    }

    impl ScriptedWorld {
        fn new(samples: Vec<Pose2D>) -> Self {
            Self {
                samples,
                cursor: 0,
                wall_x: None,
                path_checks: Cell::new(0),
            }
        }

        fn with_wall(mut self, x: f32) -> Self {
            self.wall_x = Some(x);
            self
        }
    }

    impl World for ScriptedWorld {
        fn sample_free_pose_uniform(&mut self) -> std::result::Result<Pose2D, WorldError> {
            if self.samples.is_empty() {
                return Err(WorldError::FreeSpaceExhausted { attempts: 0 });
            }
            let pose = self.samples[self.cursor % self.samples.len()];
            self.cursor += 1;
            Ok(pose)
        }

        fn is_pose_collision_free(&self, _pose: Pose2D) -> std::result::Result<bool, WorldError> {
            Ok(true)
        }

        fn is_path_collision_free(
            &self,
            from: Pose2D,
            to: Pose2D,
        ) -> std::result::Result<bool, WorldError> {
            self.path_checks.set(self.path_checks.get() + 1);
            match self.wall_x {
                Some(wall) => Ok((from.x < wall) == (to.x < wall)),
                None => Ok(true),
            }
        }
    }

    fn pose(x: f32, y: f32) -> Pose2D {
        Pose2D::new(x, y, 0.0)
    }

    #[test]
    fn test_unidirectional_direct_link() {
        let mut world = ScriptedWorld::new(vec![pose(0.5, 0.0)]);
        let config = RrtConfig::default().with_max_connection_dist(0.6);
        let mut planner = RrtPlanner::new(&mut world, config);

        let result = planner.plan(pose(0.0, 0.0), pose(1.0, 0.0)).unwrap();

        assert!(result.success);
        assert_eq!(result.failure_reason, None);
        assert_eq!(result.waypoint_count(), 3);
        assert!(result.path[0].approx_eq(pose(0.0, 0.0), 1e-6, 1e-6));
        assert!(result.path[2].approx_eq(pose(1.0, 0.0), 1e-6, 1e-6));
        assert!((result.cost - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_attempt_without_connect_mode() {
        // Wall at x=0.6 blocks the link attempt but not tree growth
        let mut world = ScriptedWorld::new(vec![pose(0.4, 0.0)]).with_wall(0.6);
        let config = RrtConfig::default()
            .with_max_connection_dist(0.5)
            .with_budget(1, 5.0);
        let mut planner = RrtPlanner::new(&mut world, config);

        let result = planner.plan(pose(0.0, 0.0), pose(0.8, 0.0)).unwrap();
        assert!(!result.success);

        // Two iterations ran before the sample budget tripped. Each
        // makes one growth check plus exactly one link attempt, since
        // the goal lies within the step bound and extension is off.
        assert_eq!(world.path_checks.get(), 4);
    }

    #[test]
    fn test_connect_mode_retries_within_one_call() {
        let mut world = ScriptedWorld::new(vec![pose(0.4, 0.0)]).with_wall(0.6);
        let mut config = RrtConfig::default()
            .with_max_connection_dist(0.5)
            .with_budget(1, 5.0);
        config.connect_mode = true;
        let mut planner = RrtPlanner::new(&mut world, config);

        let result = planner.plan(pose(0.0, 0.0), pose(0.8, 0.0)).unwrap();
        assert!(!result.success);

        // With extension on, each blocked link attempt is followed by
        // one stepped retry: three checks per iteration, two iterations.
        assert_eq!(world.path_checks.get(), 6);
    }

    #[test]
    fn test_sampler_failure_propagates() {
        let mut world = ScriptedWorld::new(vec![]);
        let mut planner = RrtPlanner::new(&mut world, RrtConfig::default());

        let result = planner.plan(pose(0.0, 0.0), pose(1.0, 0.0));
        assert!(matches!(
            result,
            Err(PlanError::World(WorldError::FreeSpaceExhausted { .. }))
        ));
    }

    #[test]
    fn test_sample_budget_terminates_unreachable_goal() {
        let mut world =
            ScriptedWorld::new(vec![pose(1.0, 0.0), pose(1.5, 0.5), pose(0.5, 1.0)]).with_wall(2.0);
        let config = RrtConfig::default().with_budget(10, 30.0);
        let mut planner = RrtPlanner::new(&mut world, config);

        let result = planner.plan(pose(0.0, 0.0), pose(5.0, 0.0)).unwrap();

        assert!(!result.success);
        assert_eq!(result.failure_reason, Some(PlanFailure::SampleBudgetExceeded));
        assert_eq!(result.nodes_sampled, 11);
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_bidirectional_trees_meet() {
        let mut world = ScriptedWorld::new(vec![pose(1.0, 0.0)]);
        let mut config = RrtConfig::default().with_max_connection_dist(0.6);
        config.bidirectional = true;
        let mut planner = RrtPlanner::new(&mut world, config);

        let result = planner.plan(pose(0.0, 0.0), pose(2.0, 0.0)).unwrap();

        assert!(result.success);
        assert!(result.path[0].approx_eq(pose(0.0, 0.0), 1e-6, 1e-6));
        assert!(result
            .path
            .last()
            .unwrap()
            .approx_eq(pose(2.0, 0.0), 1e-6, 1e-6));
        assert!((result.cost - 2.0).abs() < 1e-5);
        assert!(!planner.goal_tree().is_empty());
    }

    #[test]
    fn test_rewire_picks_cheapest_feasible_parent() {
        let world = ScriptedWorld::new(vec![]);
        let config = RrtConfig::default().with_rewire_radius(0.9);

        let mut g = SearchGraph::new();
        let root = g.insert(Node::root(pose(0.0, 0.0)));
        let a = g.insert(Node::child(pose(1.0, 0.0), root, 1.0));
        let c = g.insert(Node::child(pose(2.0, 0.0), root, 2.0));
        // Same pose as `a`, but a distinct node with a worse cost
        let tgt = g.insert(Node::child(pose(1.0, 0.0), c, 3.0));

        let rewired = rewire(&world, &config, &mut g, tgt).unwrap();

        assert!(rewired);
        // The equal-pose node is a valid candidate and wins at distance 0
        assert_eq!(g.node(tgt).parent, Some(a));
        assert!((g.node(tgt).cost - 1.0).abs() < 1e-6);
        let incident: Vec<_> = g.edges().iter().filter(|e| e.touches(tgt)).collect();
        assert_eq!(incident.len(), 1);
        assert!(incident[0].connects(tgt, a));
    }

    #[test]
    fn test_rewire_rejects_equal_cost() {
        let world = ScriptedWorld::new(vec![]);
        let config = RrtConfig::default().with_rewire_radius(2.0);

        let mut g = SearchGraph::new();
        let root = g.insert(Node::root(pose(0.0, 0.0)));
        let tgt = g.insert(Node::child(pose(1.0, 0.0), root, 1.0));

        // The only candidate (the root) offers the same cost, not less
        let rewired = rewire(&world, &config, &mut g, tgt).unwrap();
        assert!(!rewired);
        assert_eq!(g.node(tgt).parent, Some(root));
    }

    #[test]
    fn test_extend_until_connect_steps_to_target() {
        let world = ScriptedWorld::new(vec![]);
        let mut config = RrtConfig::default().with_max_connection_dist(0.5);
        config.connect_mode = true;

        let mut g = SearchGraph::new();
        let root = g.insert(Node::root(pose(0.0, 0.0)));

        let (linked, end) = extend_until_connect(&world, &config, &mut g, root, pose(2.0, 0.0)).unwrap();

        assert!(linked);
        assert!(g.node(end).pose.approx_eq(pose(2.0, 0.0), 1e-6, 1e-6));
        assert!((g.node(end).cost - 2.0).abs() < 1e-5);
        // Root, three full steps, the in-reach step, and the target
        assert_eq!(g.len(), 6);
    }

    #[test]
    fn test_extend_stops_at_wall() {
        let world = ScriptedWorld::new(vec![]).with_wall(1.2);
        let mut config = RrtConfig::default().with_max_connection_dist(0.5);
        config.connect_mode = true;

        let mut g = SearchGraph::new();
        let root = g.insert(Node::root(pose(0.0, 0.0)));

        let (linked, end) = extend_until_connect(&world, &config, &mut g, root, pose(2.0, 0.0)).unwrap();

        assert!(!linked);
        assert!(g.node(end).pose.approx_eq(pose(1.0, 0.0), 1e-6, 1e-6));
    }

    #[test]
    fn test_extend_respects_step_cap() {
        let world = ScriptedWorld::new(vec![]);
        let mut config = RrtConfig::default().with_max_connection_dist(0.5);
        config.connect_mode = true;
        config.max_extend_steps = 3;

        let mut g = SearchGraph::new();
        let root = g.insert(Node::root(pose(0.0, 0.0)));

        let (linked, end) = extend_until_connect(&world, &config, &mut g, root, pose(5.0, 0.0)).unwrap();

        assert!(!linked);
        assert_eq!(g.len(), 4);
        assert!(g.node(end).pose.approx_eq(pose(1.5, 0.0), 1e-5, 1e-6));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut world = ScriptedWorld::new(vec![pose(0.5, 0.0)]);
        let config = RrtConfig::default().with_max_connection_dist(0.6);
        let mut planner = RrtPlanner::new(&mut world, config);

        planner.plan(pose(0.0, 0.0), pose(1.0, 0.0)).unwrap();
        assert!(!planner.start_tree().is_empty());

        planner.reset();
        assert!(planner.start_tree().is_empty());
        assert!(planner.goal_tree().is_empty());
        assert_eq!(planner.nodes_sampled(), 0);
        assert_eq!(planner.rewire_count(), 0);
    }
}
