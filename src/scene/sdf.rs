//! Signed distance function for the button shape
//!
//! Same shape the fragment shader draws, so hit-testing matches what the
//! player sees.

use glam::Vec2;

/// Signed distance to a rounded box centered at the origin
///
/// `half` is the half extent, `radius` the corner radius (clamped to fit).
pub fn sd_round_box(p: Vec2, half: Vec2, radius: f32) -> f32 {
    let r = radius.clamp(0.0, half.x.min(half.y));
    let q = p.abs() - half + Vec2::splat(r);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - r
}
