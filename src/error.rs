// src/error.rs

use thiserror::Error;

/// Top-level error type for loading, building and exporting mazes.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error(transparent)]
    Wall(#[from] WallError),

    #[error(transparent)]
    Bsp(#[from] BspError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rejected wall construction or a malformed exported wall record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WallError {
    #[error("start position ({x}, {y}) can't be negative")]
    NegativeStart { x: i32, y: i32 },

    #[error("end position ({x}, {y}) can't be negative")]
    NegativeEnd { x: i32, y: i32 },

    #[error("end position of ({x}, {y}) + ({dx}, {dy}) is out of range")]
    EndOverflow { x: i32, y: i32, dx: i32, dy: i32 },

    #[error("wall needs to extend into exactly one direction, got dx={dx}, dy={dy}")]
    BadExtension { dx: i32, dy: i32 },

    #[error("distance to exit can't be negative, got {0}")]
    NegativeDistance(i32),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("field {name} is not {expected}")]
    FieldType { name: String, expected: &'static str },
}

/// Errors raised while building the BSP tree.
#[derive(Debug, Error)]
pub enum BspError {
    #[error("BSP tree depth limit {0} exceeded")]
    DepthLimit(usize),

    #[error("no walls to partition")]
    EmptyPopulation,

    #[error(transparent)]
    Wall(#[from] WallError),
}
