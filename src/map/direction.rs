// src/map/direction.rs

/// Direction code of an axis-aligned wall extension.
///
/// The encoding is the reverse of the travel direction: a wall running
/// towards +x carries `XNegative`. Only the same/opposite relations are
/// meaningful to callers; `code()` exposes the raw value for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    XPositive,
    XNegative,
    YPositive,
    YNegative,
}

impl Direction {
    /// Derives the code from an extension vector. Exactly one component
    /// is expected to be nonzero; a zero x component falls through to y.
    pub fn from_extension(dx: i32, dy: i32) -> Self {
        if dx != 0 {
            if dx > 0 {
                Direction::XNegative
            } else {
                Direction::XPositive
            }
        } else if dy < 0 {
            Direction::YNegative
        } else {
            Direction::YPositive
        }
    }

    /// Signed integer form: ±1 on the x axis, ±2 on the y axis.
    pub fn code(self) -> i32 {
        match self {
            Direction::XPositive => 1,
            Direction::XNegative => -1,
            Direction::YPositive => 2,
            Direction::YNegative => -2,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::XPositive => Direction::XNegative,
            Direction::XNegative => Direction::XPositive,
            Direction::YPositive => Direction::YNegative,
            Direction::YNegative => Direction::YPositive,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::XPositive | Direction::XNegative)
    }

    pub fn same_as(self, other: Direction) -> bool {
        self == other
    }

    pub fn opposite_of(self, other: Direction) -> bool {
        self == other.opposite()
    }
}
