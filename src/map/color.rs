// src/map/color.rs

use crate::utils::util::wrap;

/// Baseline value for the channels a hue family leaves unused.
pub const RGB_MIN: i32 = 20;

/// A wall color as three channel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Rgb { r, g, b }
    }

    /// Packed `0xRRGGBB` form used for export and equality.
    pub fn packed(&self) -> i32 {
        pack_rgb(*self)
    }
}

/// Packs a channel triple as `r * 65536 + g * 256 + b`.
pub fn pack_rgb(color: Rgb) -> i32 {
    color.r * 65536 + color.g * 256 + color.b
}

/// Inverse of [`pack_rgb`] for channels in `0..=255`.
pub fn unpack_rgb(packed: i32) -> Rgb {
    Rgb {
        r: (packed >> 16) & 0xff,
        g: (packed >> 8) & 0xff,
        b: packed & 0xff,
    }
}

/// Derives the wall color from its distance to the exit.
///
/// The low three bits of `distance / 4` pick the brightness within a hue
/// family, horizontal walls are one step brighter, and the next distance
/// band mixed with `color_cycle` picks one of six hue families.
pub fn wall_color(distance: i32, color_cycle: i32, horizontal: bool) -> Rgb {
    let d = distance / 4;
    let value = channel_value(d, horizontal);
    match wrap((d >> 3) ^ color_cycle, 6) {
        0 => Rgb::new(value, RGB_MIN, RGB_MIN),
        1 => Rgb::new(RGB_MIN, value, RGB_MIN),
        2 => Rgb::new(RGB_MIN, RGB_MIN, value),
        3 => Rgb::new(value, value, RGB_MIN),
        4 => Rgb::new(RGB_MIN, value, value),
        5 => Rgb::new(value, RGB_MIN, value),
        _ => Rgb::new(RGB_MIN, RGB_MIN, RGB_MIN),
    }
}

// Range is [97, 167]; 158 is the vertical maximum.
fn channel_value(d: i32, horizontal: bool) -> i32 {
    let part = d & 7;
    let add = i32::from(horizontal);
    ((part + 2 + add) * 70) / 8 + 80
}
