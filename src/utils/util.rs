//! # Utility Module
//!
//! This module contains small integer helpers shared by the wall model and
//! the BSP builder.
//!
//! ## Example Function: `sign`
//!
//! The `sign` function reduces a cross-product value to the side of a line it
//! describes: `1` for the right side, `-1` for the left side and `0` for a
//! point lying on the line.

/// Returns the sign of `value` as `-1`, `0` or `1`.
///
/// # Arguments
///
/// * `value` - The value whose sign is wanted.
///
/// # Examples
///
/// ```
/// use maze_bsp::utils::util::sign;
///
/// assert_eq!(sign(42), 1);
/// assert_eq!(sign(0), 0);
/// assert_eq!(sign(-7), -1);
/// ```
pub fn sign(value: i64) -> i64 {
    value.signum()
}

/// Euclidean remainder that is always in `0..modulus` for a positive modulus.
pub fn wrap(value: i32, modulus: i32) -> i32 {
    value.rem_euclid(modulus)
}
