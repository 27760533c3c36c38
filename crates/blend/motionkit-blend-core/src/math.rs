//! Scalar helpers shared by the resolver.

use crate::data::Vec2;

/// Engine-style float comparison: relative 1e-6 tolerance with an absolute
/// floor of eight smallest subnormals.
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    // from_bits(1) is the smallest positive subnormal
    let floor = f32::from_bits(1) * 8.0;
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(floor)
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Position of `t` between `a` and `b`, clamped to [0,1]. Zero when the range collapses.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, t: f32) -> f32 {
    if a == b {
        0.0
    } else {
        clamp01((t - a) / (b - a))
    }
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
