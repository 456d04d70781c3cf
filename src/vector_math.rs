//! Basic angle and vector helpers.
//! Small helpers for normalising angles and turning headings into vectors.
use std::f32::consts::TAU;

use glam::Vec2;

/// Wraps an angle into `[0, 2π)`.
///
/// Non-finite input maps to `0.0` so bodies never carry a poisoned heading.
///
/// # Examples
/// ```
/// use spritefield::vector_math::normalize_angle;
/// use std::f32::consts::PI;
/// let wrapped = normalize_angle(-PI / 2.0);
/// assert!((wrapped - 1.5 * PI).abs() < 1e-5);
/// assert_eq!(normalize_angle(0.0), 0.0);
/// ```
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // `rem_euclid` can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Returns the unit vector pointing along `angle` in the ground plane.
///
/// # Examples
/// ```
/// use spritefield::vector_math::heading;
/// let h = heading(0.0);
/// assert!((h.x - 1.0).abs() < 1e-6);
/// assert!(h.y.abs() < 1e-6);
/// ```
#[must_use]
pub fn heading(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

/// Angle pointing from `from` towards `to`.
#[must_use]
pub fn angle_towards(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x))
}
