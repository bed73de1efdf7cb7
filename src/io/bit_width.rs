//! Minimal bit-width computation for variable-width fields
//!
//! Rectangles, matrices, color transforms and edge records share one width
//! across a group of sibling values. The width is the smallest one in which
//! every value of the group round-trips exactly.

/// Convert to the 16.16 integer pattern used by `FIXED` and `FB` fields.
#[inline]
pub fn to_fixed16(value: f64) -> i32 {
    (value * 65536.0).round() as i32
}

/// Convert to the 8.8 integer pattern used by `FIXED8` fields.
#[inline]
pub fn to_fixed8(value: f64) -> i16 {
    (value * 256.0).round() as i16
}

/// Bits needed to hold `value` in a `UB` field.
///
/// Counts how often a probe must be doubled before it exceeds the value.
pub fn require_ub(value: u32) -> u32 {
    let target = value as u64;
    let mut probe: u64 = 1;
    let mut bits = 0;
    while probe <= target {
        probe <<= 1;
        bits += 1;
    }
    bits
}

/// Bits needed to hold `value` in an `SB` field (sign bit included).
pub fn require_sb(value: i32) -> u32 {
    if value < 0 {
        require_ub(!value as u32) + 1
    } else {
        require_ub(value as u32) + 1
    }
}

/// Bits needed to hold `value` in an `FB` field.
pub fn require_fb(value: f64) -> u32 {
    require_sb(to_fixed16(value))
}

/// Shared `SB` width for a group of values.
pub fn require_sb_all(values: &[i32]) -> u32 {
    values.iter().map(|&v| require_sb(v)).max().unwrap_or(0)
}

/// Shared `FB` width for a group of values.
pub fn require_fb_all(values: &[f64]) -> u32 {
    values.iter().map(|&v| require_fb(v)).max().unwrap_or(0)
}
