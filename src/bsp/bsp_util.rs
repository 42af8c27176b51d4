// src/bsp/bsp_util.rs
// Geometry helpers for partitioning walls.

use crate::bsp::{WallId, WallPosition};
use crate::map::WallSegment;
use crate::utils::util::sign;

/// Infinite line through a wall, oriented along its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line2D {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
}

impl Line2D {
    pub fn new(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Line2D { x, y, dx, dy }
    }

    pub fn from_wall(wall: &WallSegment) -> Self {
        Line2D::new(
            wall.start_x(),
            wall.start_y(),
            wall.extension_x(),
            wall.extension_y(),
        )
    }

    /// Cross product of the line direction with the offset to `(px, py)`.
    /// Positive on the right side, negative on the left, zero on the line.
    /// Computed in `i64` so long lines far apart can't overflow.
    pub fn classify_point(&self, px: i32, py: i32) -> i64 {
        (i64::from(px) - i64::from(self.x)) * i64::from(self.dy)
            + (i64::from(py) - i64::from(self.y)) * -i64::from(self.dx)
    }

    /// Point where a wall perpendicular to this axis-aligned line crosses it.
    /// Returns `None` for walls parallel to the line.
    pub fn intersect(&self, wall: &WallSegment) -> Option<(i32, i32)> {
        let horizontal_line = self.dy == 0;
        if horizontal_line == wall.is_horizontal() {
            return None;
        }
        if horizontal_line {
            Some((wall.start_x(), self.y))
        } else {
            Some((self.x, wall.start_y()))
        }
    }
}

/// Classifies `wall` against the line through `candidate`.
///
/// A wall touching the line with one end is classified by its other end;
/// a wall lying on the line is classified by its direction.
pub fn classify_wall(candidate: &WallSegment, wall: &WallSegment) -> WallPosition {
    let line = Line2D::from_wall(candidate);
    let mut dot_start = line.classify_point(wall.start_x(), wall.start_y());
    let dot_end = line.classify_point(wall.end_x(), wall.end_y());

    if sign(dot_start) != sign(dot_end) {
        if dot_start == 0 {
            dot_start = dot_end;
        } else if dot_end != 0 {
            return WallPosition::Spanning;
        }
    }

    if dot_start > 0 || (dot_start == 0 && candidate.has_same_direction(wall)) {
        WallPosition::Right
    } else if dot_start < 0 || (dot_start == 0 && candidate.has_opposite_direction(wall)) {
        WallPosition::Left
    } else {
        WallPosition::Ambiguous { dot_start, dot_end }
    }
}

/// True when both ends of `wall` lie on the line through `candidate`.
pub fn is_colinear(candidate: &WallSegment, wall: &WallSegment) -> bool {
    let line = Line2D::from_wall(candidate);
    line.classify_point(wall.start_x(), wall.start_y()) == 0
        && line.classify_point(wall.end_x(), wall.end_y()) == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::new_empty()
    }
}

impl BoundingBox {
    pub fn new_empty() -> Self {
        BoundingBox {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
        }
    }

    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn expand_point(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn from_walls(walls: &[WallSegment], ids: &[WallId]) -> Self {
        let mut bbox = BoundingBox::new_empty();
        for id in ids {
            let wall = &walls[id.0];
            bbox.expand_point(wall.start_x(), wall.start_y());
            bbox.expand_point(wall.end_x(), wall.end_y());
        }
        bbox
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: i32, y: i32, dx: i32, dy: i32) -> WallSegment {
        WallSegment::new(x, y, dx, dy, 0, 0).unwrap()
    }

    #[test]
    fn test_classify_point_sides() {
        let line = Line2D::from_wall(&wall(0, 0, 10, 0));
        assert_eq!(line.classify_point(5, -3), 30);
        assert_eq!(line.classify_point(5, 3), -30);
        assert_eq!(line.classify_point(7, 0), 0);
    }

    #[test]
    fn test_classify_point_large_coordinates() {
        let line = Line2D::from_wall(&wall(0, 0, 60_000, 0));
        assert_eq!(line.classify_point(30_000, 50_000), -3_000_000_000);
        assert_eq!(line.classify_point(30_000, 0), 0);
    }

    #[test]
    fn test_classify_far_wall_on_long_line() {
        let candidate = wall(0, 0, 60_000, 0);
        let far = wall(30_000, 50_000, 0, 10);
        assert_eq!(classify_wall(&candidate, &far), WallPosition::Left);
        assert!(!is_colinear(&candidate, &far));
    }

    #[test]
    fn test_classify_spanning() {
        let candidate = wall(0, 5, 10, 0);
        assert_eq!(classify_wall(&candidate, &wall(5, 2, 0, 6)), WallPosition::Spanning);
    }

    #[test]
    fn test_classify_touching_end_uses_other_end() {
        let candidate = wall(0, 5, 10, 0);
        // starts on the line, ends above it (y < 5 is the right side)
        assert_eq!(classify_wall(&candidate, &wall(3, 5, 0, -2)), WallPosition::Right);
        // ends on the line, starts below it
        assert_eq!(classify_wall(&candidate, &wall(3, 8, 0, -3)), WallPosition::Left);
    }

    #[test]
    fn test_classify_colinear_by_direction() {
        let candidate = wall(0, 5, 10, 0);
        let same = wall(12, 5, 4, 0);
        let opposite = wall(20, 5, -4, 0);
        assert_eq!(classify_wall(&candidate, &same), WallPosition::Right);
        assert_eq!(classify_wall(&candidate, &opposite), WallPosition::Left);
        assert!(is_colinear(&candidate, &same));
        assert!(is_colinear(&candidate, &opposite));
        assert!(!is_colinear(&candidate, &wall(0, 6, 4, 0)));
    }

    #[test]
    fn test_intersect_perpendicular_only() {
        let line = Line2D::from_wall(&wall(0, 5, 10, 0));
        assert_eq!(line.intersect(&wall(3, 2, 0, 6)), Some((3, 5)));
        assert_eq!(line.intersect(&wall(0, 9, 4, 0)), None);

        let vertical = Line2D::from_wall(&wall(4, 0, 0, 10));
        assert_eq!(vertical.intersect(&wall(1, 7, 6, 0)), Some((4, 7)));
    }

    #[test]
    fn test_bounding_box() {
        let walls = vec![wall(2, 3, 5, 0), wall(1, 9, 0, -8)];
        let bbox = BoundingBox::from_walls(&walls, &[WallId(0), WallId(1)]);
        assert_eq!(bbox, BoundingBox::new(1, 1, 7, 9));
        assert!(bbox.contains_point(4, 4));
        assert!(!bbox.contains_point(0, 4));
        assert!(BoundingBox::new_empty().is_empty());
    }
}
