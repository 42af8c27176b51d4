//! src/bsp/bsp_node.rs

use crate::bsp::{BoundingBox, Line2D, WallId};

/// Handle of a node inside a [`BspTree`](crate::bsp::BspTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub usize);

/// A node in the BSP tree. Each node has:
/// - An optional `partition` line (None for leaves).
/// - Optionally a `front` child (right of the line) and a `back` child.
/// - A list of `walls` if it's a leaf (or empty if it's an internal node).
#[derive(Debug, Clone)]
pub struct BspNode {
    pub partition: Option<Line2D>,
    pub front: Option<NodeId>,
    pub back: Option<NodeId>,
    pub walls: Vec<WallId>,
    pub bbox: BoundingBox,
}

impl BspNode {
    /// Create a leaf node with the given walls.
    pub fn create_leaf(walls: Vec<WallId>, bbox: BoundingBox) -> Self {
        BspNode {
            partition: None,
            front: None,
            back: None,
            walls,
            bbox,
        }
    }

    /// Create an internal node with a partition line and front/back children.
    pub fn create_node(
        partition: Line2D,
        front: NodeId,
        back: NodeId,
        bbox: BoundingBox,
    ) -> Self {
        BspNode {
            partition: Some(partition),
            front: Some(front),
            back: Some(back),
            walls: Vec::new(),
            bbox,
        }
    }

    /// Construct a leaf with no walls. Also used as a placeholder slot
    /// while the builder's work-list still owes this node its contents.
    pub fn empty_leaf() -> Self {
        BspNode::create_leaf(Vec::new(), BoundingBox::new_empty())
    }

    /// Returns `true` if `self` is a leaf (i.e. `partition.is_none()`).
    pub fn is_leaf(&self) -> bool {
        self.partition.is_none()
    }
}
