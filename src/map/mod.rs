// src/map/mod.rs
pub mod color;
pub mod direction;
pub mod wall;

pub use color::{pack_rgb, unpack_rgb, Rgb, RGB_MIN};
pub use direction::Direction;
pub use wall::WallSegment;

/// Scale factor from maze cell coordinates to wall coordinates.
pub const MAP_UNIT: i32 = 128;
