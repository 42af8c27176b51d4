// src/map/wall.rs

use crate::document::fields::{FieldSink, FieldSource};
use crate::error::WallError;
use crate::map::color::{unpack_rgb, wall_color, Rgb};
use crate::map::Direction;

/// One straight, axis-aligned piece of maze wall.
///
/// Coordinates are in map units. Geometry and distance are fixed at
/// construction; `partition` and `seen` are flipped later by the BSP
/// builder and by gameplay. There is deliberately no `Hash` impl: walls
/// are looked up by their index in the owning store.
#[derive(Debug, Clone)]
pub struct WallSegment {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    dist: i32,
    partition: bool,
    seen: bool,
    color: Rgb,
}

impl WallSegment {
    /// Creates a wall from `(x, y)` extending by `(dx, dy)`.
    ///
    /// Exactly one of `dx`, `dy` must be nonzero and both end points must
    /// have non-negative coordinates. `color_cycle` shifts the hue family,
    /// which lets the two halves of a split wall look different.
    pub fn new(
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        distance: i32,
        color_cycle: i32,
    ) -> Result<Self, WallError> {
        validate(x, y, dx, dy, distance)?;
        Ok(WallSegment {
            x,
            y,
            dx,
            dy,
            dist: distance,
            partition: false,
            seen: false,
            color: wall_color(distance, color_cycle, dx != 0),
        })
    }

    /// Rebuilds a wall from previously exported values, keeping the stored
    /// flags and color instead of deriving them.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        distance: i32,
        partition: bool,
        seen: bool,
        color: Rgb,
    ) -> Result<Self, WallError> {
        validate(x, y, dx, dy, distance)?;
        Ok(WallSegment {
            x,
            y,
            dx,
            dy,
            dist: distance,
            partition,
            seen,
            color,
        })
    }

    pub fn start_x(&self) -> i32 {
        self.x
    }

    pub fn start_y(&self) -> i32 {
        self.y
    }

    pub fn extension_x(&self) -> i32 {
        self.dx
    }

    pub fn extension_y(&self) -> i32 {
        self.dy
    }

    pub fn end_x(&self) -> i32 {
        self.x + self.dx
    }

    pub fn end_y(&self) -> i32 {
        self.y + self.dy
    }

    /// Distance from the start position to the maze exit.
    pub fn distance(&self) -> i32 {
        self.dist
    }

    /// Length of the wall, always `>= 0`.
    pub fn length(&self) -> i32 {
        (self.dx + self.dy).abs()
    }

    pub fn is_horizontal(&self) -> bool {
        self.dx != 0
    }

    pub fn direction(&self) -> Direction {
        Direction::from_extension(self.dx, self.dy)
    }

    /// Raw direction code in `{-2, -1, 1, 2}`.
    pub fn direction_code(&self) -> i32 {
        self.direction().code()
    }

    pub fn has_same_direction(&self, other: &WallSegment) -> bool {
        self.direction().same_as(other.direction())
    }

    pub fn has_opposite_direction(&self, other: &WallSegment) -> bool {
        self.direction().opposite_of(other.direction())
    }

    pub fn is_partition(&self) -> bool {
        self.partition
    }

    pub fn set_partition(&mut self, partition: bool) {
        self.partition = partition;
    }

    pub fn is_seen(&self) -> bool {
        self.seen
    }

    pub fn set_seen(&mut self, seen: bool) {
        self.seen = seen;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Marks the wall as already partitioned when it lies on the outer
    /// border of a `width` x `height` maze (both in map units).
    ///
    /// Only the start point is checked: a vertical wall must start at
    /// x = 0 or x = width, a horizontal one at y = 0 or y = height.
    /// Returns the resulting partition flag.
    pub fn mark_border_if_applicable(&mut self, width: i32, height: i32) -> bool {
        let vertical_border = (self.x == 0 || self.x == width) && self.dx == 0;
        let horizontal_border = (self.y == 0 || self.y == height) && self.dy == 0;
        if vertical_border || horizontal_border {
            self.partition = true;
        }
        self.partition
    }

    /// Writes the wall fields under `<field>Seg_<number>_<id>` names.
    pub fn store<S: FieldSink + ?Sized>(&self, sink: &mut S, number: usize, id: usize) {
        sink.put_int(&field_name("dist", number, id), self.dist);
        sink.put_int(&field_name("dx", number, id), self.dx);
        sink.put_int(&field_name("dy", number, id), self.dy);
        sink.put_bool(&field_name("partition", number, id), self.partition);
        sink.put_bool(&field_name("seen", number, id), self.seen);
        sink.put_int(&field_name("x", number, id), self.x);
        sink.put_int(&field_name("y", number, id), self.y);
        sink.put_int(&field_name("col", number, id), self.color.packed());
    }

    /// Reads back a wall written by [`WallSegment::store`].
    pub fn load<S: FieldSource + ?Sized>(
        source: &S,
        number: usize,
        id: usize,
    ) -> Result<Self, WallError> {
        WallSegment::restore(
            source.get_int(&field_name("x", number, id))?,
            source.get_int(&field_name("y", number, id))?,
            source.get_int(&field_name("dx", number, id))?,
            source.get_int(&field_name("dy", number, id))?,
            source.get_int(&field_name("dist", number, id))?,
            source.get_bool(&field_name("partition", number, id))?,
            source.get_bool(&field_name("seen", number, id))?,
            unpack_rgb(source.get_int(&field_name("col", number, id))?),
        )
    }
}

impl PartialEq for WallSegment {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.dx == other.dx
            && self.dy == other.dy
            && self.dist == other.dist
            && self.partition == other.partition
            && self.seen == other.seen
            && self.color.packed() == other.color.packed()
    }
}

impl Eq for WallSegment {}

fn field_name(field: &str, number: usize, id: usize) -> String {
    format!("{field}Seg_{number}_{id}")
}

fn validate(x: i32, y: i32, dx: i32, dy: i32, distance: i32) -> Result<(), WallError> {
    if x < 0 || y < 0 {
        return Err(WallError::NegativeStart { x, y });
    }
    if (dx == 0) == (dy == 0) {
        return Err(WallError::BadExtension { dx, dy });
    }
    let (Some(end_x), Some(end_y)) = (x.checked_add(dx), y.checked_add(dy)) else {
        return Err(WallError::EndOverflow { x, y, dx, dy });
    };
    if end_x < 0 || end_y < 0 {
        return Err(WallError::NegativeEnd { x: end_x, y: end_y });
    }
    if distance < 0 {
        return Err(WallError::NegativeDistance(distance));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fields::JsonFields;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn wall(x: i32, y: i32, dx: i32, dy: i32) -> WallSegment {
        WallSegment::new(x, y, dx, dy, 0, 0).unwrap()
    }

    #[test]
    fn test_new_wall_defaults() {
        let w = WallSegment::new(0, 0, 10, 0, 0, 0).unwrap();
        assert!(!w.is_partition());
        assert!(!w.is_seen());
        assert_eq!(w.color(), Rgb::new(106, 20, 20));
        assert_eq!(w.end_x(), 10);
        assert_eq!(w.end_y(), 0);
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert_eq!(
            WallSegment::new(0, 0, 0, 0, 0, 0),
            Err(WallError::BadExtension { dx: 0, dy: 0 })
        );
        assert_eq!(
            WallSegment::new(0, 0, 3, 3, 0, 0),
            Err(WallError::BadExtension { dx: 3, dy: 3 })
        );
        assert_eq!(
            WallSegment::new(-1, 0, 3, 0, 0, 0),
            Err(WallError::NegativeStart { x: -1, y: 0 })
        );
        assert_eq!(
            WallSegment::new(2, 0, -3, 0, 0, 0),
            Err(WallError::NegativeEnd { x: -1, y: 0 })
        );
        assert_eq!(
            WallSegment::new(2, 0, 3, 0, -4, 0),
            Err(WallError::NegativeDistance(-4))
        );
    }

    #[test]
    fn test_rejects_end_past_i32_range() {
        assert_eq!(
            WallSegment::new(i32::MAX, 0, 1, 0, 0, 0),
            Err(WallError::EndOverflow { x: i32::MAX, y: 0, dx: 1, dy: 0 })
        );
        assert!(WallSegment::new(0, i32::MAX, 0, 5, 0, 0).is_err());
        assert!(WallSegment::new(i32::MAX, 0, -1, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_random_construction_keeps_axis_exclusivity() {
        let mut rng = StdRng::seed_from_u64(301);
        let mut built = 0;
        for _ in 0..2000 {
            let x = rng.random_range(-2..20);
            let y = rng.random_range(-2..20);
            let dx = rng.random_range(-6..=6);
            let dy = rng.random_range(-6..=6);
            let valid = x >= 0 && y >= 0 && x + dx >= 0 && y + dy >= 0 && ((dx == 0) != (dy == 0));
            match WallSegment::new(x, y, dx, dy, 8, 0) {
                Ok(w) => {
                    assert!(valid);
                    assert!((w.extension_x() == 0) != (w.extension_y() == 0));
                    let expected = if w.extension_y() == 0 { dx.abs() } else { dy.abs() };
                    assert_eq!(w.length(), expected);
                    built += 1;
                }
                Err(_) => assert!(!valid),
            }
        }
        assert!(built > 0);
    }

    #[test]
    fn test_reversed_extension_flips_direction_code() {
        let cases = [(5, 5, 4, 0), (5, 5, -4, 0), (5, 5, 0, 4), (5, 5, 0, -4)];
        for (x, y, dx, dy) in cases {
            let w = wall(x, y, dx, dy);
            let r = wall(x, y, -dx, -dy);
            assert_eq!(r.direction_code(), -w.direction_code());
            assert!(w.has_opposite_direction(&r));
            assert!(!w.has_same_direction(&r));
        }
    }

    #[test]
    fn test_same_and_opposite_cover_parallel_walls() {
        let a = wall(5, 5, 4, 0);
        let parallel = [wall(0, 9, 2, 0), wall(9, 1, -3, 0)];
        for b in &parallel {
            assert!(a.has_same_direction(b) ^ a.has_opposite_direction(b));
        }
        let crossing = wall(1, 1, 0, 3);
        assert!(!a.has_same_direction(&crossing));
        assert!(!a.has_opposite_direction(&crossing));
    }

    #[test]
    fn test_border_marking() {
        let mut top = wall(0, 0, 5, 0);
        assert!(top.mark_border_if_applicable(5, 10));
        assert!(top.is_partition());

        let mut inner = wall(2, 3, 0, 4);
        assert!(!inner.mark_border_if_applicable(10, 10));
        assert!(!inner.is_partition());

        let mut right = wall(10, 2, 0, 3);
        assert!(right.mark_border_if_applicable(10, 10));
    }

    #[test]
    fn test_border_marking_checks_start_only() {
        // Ends on the right border but starts inside.
        let mut w = wall(7, 4, 3, 0);
        assert!(!w.mark_border_if_applicable(10, 10));
    }

    #[test]
    fn test_equality_compares_packed_color() {
        let a = WallSegment::new(1, 1, 0, 4, 12, 0).unwrap();
        let b = WallSegment::new(1, 1, 0, 4, 12, 0).unwrap();
        let c = WallSegment::new(1, 1, 0, 4, 12, 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut d = b.clone();
        d.set_seen(true);
        assert_ne!(a, d);
    }

    #[test]
    fn test_store_and_load() {
        let mut w = WallSegment::new(4, 8, 0, -4, 17, 3).unwrap();
        w.set_partition(true);
        w.set_seen(true);

        let mut fields = JsonFields::new();
        w.store(&mut fields, 2, 9);
        for name in [
            "distSeg_2_9",
            "dxSeg_2_9",
            "dySeg_2_9",
            "partitionSeg_2_9",
            "seenSeg_2_9",
            "xSeg_2_9",
            "ySeg_2_9",
            "colSeg_2_9",
        ] {
            assert!(fields.contains(name), "missing {name}");
        }

        let back = WallSegment::load(&fields, 2, 9).unwrap();
        assert_eq!(back, w);
        assert_eq!(back.color().packed(), w.color().packed());
    }

    #[test]
    fn test_load_missing_field() {
        let fields = JsonFields::new();
        assert_eq!(
            WallSegment::load(&fields, 0, 0),
            Err(WallError::MissingField("xSeg_0_0".to_string()))
        );
    }
}
