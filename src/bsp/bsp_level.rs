// src/bsp/bsp_level.rs

use crate::bsp::bsp_util::is_colinear;
use crate::bsp::{
    classify_wall, BoundingBox, BspConfig, BspNode, Line2D, NodeId, PartitionGrader, WallId,
    WallPosition,
};
use crate::error::BspError;
use crate::map::WallSegment;
use log::{debug, info, trace, warn};

/// Counters collected while building a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub walls_in: usize,
    pub walls_out: usize,
    pub borders: usize,
    pub splits: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

impl BuildStats {
    pub fn average_leaf_size(&self) -> f64 {
        if self.leaves == 0 {
            return 0.0;
        }
        self.walls_out as f64 / self.leaves as f64
    }
}

/// A finished BSP tree over a maze's walls.
///
/// Nodes and walls live in flat arenas addressed by [`NodeId`] and
/// [`WallId`]. Every wall is referenced by exactly one leaf.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    root: NodeId,
    walls: Vec<WallSegment>,
    stats: BuildStats,
}

impl BspTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &BspNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn wall(&self, id: WallId) -> &WallSegment {
        &self.walls[id.0]
    }

    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node(id);
            stack.extend(node.front.map(|c| (c, depth + 1)));
            stack.extend(node.back.map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Finds the leaf whose region holds `(x, y)`. Points on a partition
    /// line go to the front. Returns `None` outside the maze's walls.
    pub fn locate_leaf(&self, x: i32, y: i32) -> Option<NodeId> {
        if !self.node(self.root).bbox.contains_point(x, y) {
            return None;
        }
        let mut current = self.root;
        loop {
            let node = self.node(current);
            let (Some(line), Some(front), Some(back)) = (node.partition, node.front, node.back)
            else {
                return Some(current);
            };
            current = if line.classify_point(x, y) >= 0 { front } else { back };
        }
    }
}

// One pending node: the slot to fill and the walls that fall into it.
struct Task {
    slot: NodeId,
    walls: Vec<WallId>,
    depth: usize,
}

/// Builds a [`BspTree`] from a maze's walls.
///
/// Each node picks the lowest-graded wall that is not yet a partition,
/// marks every wall on its line as partition, sends the rest to the front
/// (right) or back (left) and splits walls that cross the line. A node
/// whose walls are all partitions becomes a leaf. Work is kept on an
/// explicit stack so deep trees don't recurse.
pub struct BspBuilder {
    grader: PartitionGrader,
    walls: Vec<WallSegment>,
    nodes: Vec<BspNode>,
    color_cycle: i32,
    stats: BuildStats,
}

impl BspBuilder {
    pub fn new(config: BspConfig) -> Self {
        BspBuilder {
            grader: PartitionGrader::new(config),
            walls: Vec::new(),
            nodes: Vec::new(),
            color_cycle: 0,
            stats: BuildStats::default(),
        }
    }

    /// Builds the tree for a `width` x `height` maze (map units). Walls on
    /// the outer border are marked as partitions before grading starts.
    pub fn build(
        mut self,
        walls: Vec<WallSegment>,
        width: i32,
        height: i32,
    ) -> Result<BspTree, BspError> {
        if walls.is_empty() {
            return Err(BspError::EmptyPopulation);
        }
        self.stats.walls_in = walls.len();
        self.walls = walls;
        self.stats.borders = self
            .walls
            .iter_mut()
            .map(|w| w.mark_border_if_applicable(width, height))
            .filter(|&partition| partition)
            .count();
        debug!(
            "{} of {} walls already partitioned",
            self.stats.borders, self.stats.walls_in
        );

        let depth_limit = self.grader.config().depth_limit;
        let root = self.alloc_node();
        let mut work = vec![Task {
            slot: root,
            walls: (0..self.walls.len()).map(WallId).collect(),
            depth: 0,
        }];

        while let Some(task) = work.pop() {
            if task.depth > depth_limit {
                return Err(BspError::DepthLimit(depth_limit));
            }
            self.stats.max_depth = self.stats.max_depth.max(task.depth);
            let bbox = BoundingBox::from_walls(&self.walls, &task.walls);

            let candidates: Vec<WallId> = task
                .walls
                .iter()
                .copied()
                .filter(|id| !self.walls[id.0].is_partition())
                .collect();
            let Some((best, grade)) =
                self.grader
                    .select_partition(&self.walls, &candidates, &task.walls)
            else {
                trace!("leaf with {} walls at depth {}", task.walls.len(), task.depth);
                self.stats.leaves += 1;
                self.nodes[task.slot.0] = BspNode::create_leaf(task.walls, bbox);
                continue;
            };

            let plane = self.walls[best.0].clone();
            trace!(
                "depth {}: partition ({}, {}) + ({}, {}) grade {} of {} candidates",
                task.depth,
                plane.start_x(),
                plane.start_y(),
                plane.extension_x(),
                plane.extension_y(),
                grade,
                candidates.len()
            );
            let (front_walls, back_walls) = self.distribute(&plane, task.walls)?;

            let front = self.alloc_node();
            let back = self.alloc_node();
            self.nodes[task.slot.0] =
                BspNode::create_node(Line2D::from_wall(&plane), front, back, bbox);
            work.push(Task {
                slot: back,
                walls: back_walls,
                depth: task.depth + 1,
            });
            work.push(Task {
                slot: front,
                walls: front_walls,
                depth: task.depth + 1,
            });
        }

        let tree = self.finish(root);
        info!(
            "BSP built: {} walls in, {} out, {} splits, {} nodes, {} leaves, depth {}",
            tree.stats.walls_in,
            tree.stats.walls_out,
            tree.stats.splits,
            tree.stats.nodes,
            tree.stats.leaves,
            tree.stats.max_depth
        );
        Ok(tree)
    }

    fn alloc_node(&mut self) -> NodeId {
        self.nodes.push(BspNode::empty_leaf());
        NodeId(self.nodes.len() - 1)
    }

    // Sorts walls to the front/back of `plane`, marking walls on the
    // line as partitions and splitting walls that cross it.
    fn distribute(
        &mut self,
        plane: &WallSegment,
        ids: Vec<WallId>,
    ) -> Result<(Vec<WallId>, Vec<WallId>), BspError> {
        let mut front = Vec::new();
        let mut back = Vec::new();
        for id in ids {
            if is_colinear(plane, &self.walls[id.0]) {
                self.walls[id.0].set_partition(true);
            }
            match classify_wall(plane, &self.walls[id.0]) {
                WallPosition::Right => front.push(id),
                WallPosition::Left => back.push(id),
                WallPosition::Spanning => {
                    for piece in self.split_wall(plane, id)? {
                        match classify_wall(plane, &self.walls[piece.0]) {
                            WallPosition::Left => back.push(piece),
                            _ => front.push(piece),
                        }
                    }
                }
                WallPosition::Ambiguous { dot_start, dot_end } => {
                    warn!(
                        "wall {} has no side: dot1 = {}, dot2 = {}",
                        id.0, dot_start, dot_end
                    );
                    front.push(id);
                }
            }
        }
        Ok((front, back))
    }

    // Splits a crossing wall where it meets the plane. The halves keep the
    // parent's distance and flags and get consecutive color cycles.
    fn split_wall(&mut self, plane: &WallSegment, id: WallId) -> Result<Vec<WallId>, BspError> {
        let wall = &self.walls[id.0];
        let Some((ix, iy)) = Line2D::from_wall(plane).intersect(wall) else {
            warn!("wall {} crosses a parallel partition; left unsplit", id.0);
            return Ok(vec![id]);
        };

        let cycle = self.color_cycle;
        let mut first = WallSegment::new(
            wall.start_x(),
            wall.start_y(),
            ix - wall.start_x(),
            iy - wall.start_y(),
            wall.distance(),
            cycle,
        )?;
        let mut second = WallSegment::new(
            ix,
            iy,
            wall.end_x() - ix,
            wall.end_y() - iy,
            wall.distance(),
            cycle + 1,
        )?;
        for piece in [&mut first, &mut second] {
            piece.set_partition(wall.is_partition());
            piece.set_seen(wall.is_seen());
        }
        self.color_cycle += 1;
        self.stats.splits += 1;

        self.walls.push(first);
        self.walls.push(second);
        let n = self.walls.len();
        Ok(vec![WallId(n - 2), WallId(n - 1)])
    }

    // Drops walls that were replaced by their split halves and renumbers
    // the survivors in leaf order.
    fn finish(self, root: NodeId) -> BspTree {
        let BspBuilder {
            walls: arena,
            mut nodes,
            mut stats,
            ..
        } = self;

        let mut remap: Vec<Option<WallId>> = vec![None; arena.len()];
        let mut walls = Vec::with_capacity(arena.len());
        for node in &mut nodes {
            for id in &mut node.walls {
                let new_id = match remap[id.0] {
                    Some(new_id) => new_id,
                    None => {
                        let new_id = WallId(walls.len());
                        walls.push(arena[id.0].clone());
                        remap[id.0] = Some(new_id);
                        new_id
                    }
                };
                *id = new_id;
            }
        }

        stats.walls_out = walls.len();
        stats.nodes = nodes.len();
        BspTree {
            nodes,
            root,
            walls,
            stats,
        }
    }
}

impl Default for BspBuilder {
    fn default() -> Self {
        Self::new(BspConfig::default())
    }
}
