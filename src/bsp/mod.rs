// src/bsp/mod.rs
pub mod bsp_level;
pub mod bsp_node;
pub mod bsp_util;
pub mod config;
pub mod grade;

pub use bsp_level::{BspBuilder, BspTree, BuildStats};
pub use bsp_node::{BspNode, NodeId};
pub use bsp_util::{classify_wall, BoundingBox, Line2D};
pub use config::BspConfig;
pub use grade::{compute_grade, PartitionGrader, PartitionTally};

// Grading constants; `BspConfig::default()` uses these.
pub const SAMPLE_THRESHOLD: usize = 100; // populations this large are sampled
pub const SAMPLE_TARGET: usize = 50; // roughly how many walls a sample holds
pub const SPLIT_PENALTY: i32 = 3; // cost of one forced split vs. one unit of imbalance
pub const BSP_DEPTH_LIMIT: usize = 512; // guard against runaway trees

/// Handle of a wall inside a flat wall store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WallId(pub usize);

/// Where a wall lies relative to a candidate partition line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallPosition {
    /// Right of the line, or on it running the same way.
    Right,
    /// Left of the line, or on it running the opposite way.
    Left,
    /// Crosses the line and would have to be split.
    Spanning,
    /// On the line but neither parallel nor antiparallel; should not occur.
    Ambiguous { dot_start: i64, dot_end: i64 },
}
