//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between floating-point and integer
//! domains. Out-of-range inputs yield `None` rather than wrapping so grid
//! lookups stay total.

/// Floor the value and convert to a grid index, returning `None` when it
/// falls outside `0..len`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The floored value is validated against the index domain."
)]
#[must_use]
pub fn floor_to_index(value: f32, len: usize) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let floored = value.floor();
    if floored < 0.0 || floored >= len as f32 {
        return None;
    }
    Some(floored as usize)
}

/// Round half up, the rounding floor-layer indices are derived with.
///
/// Negative results clamp to zero since layer indices are never negative.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "The value is clamped into the u32 domain before casting."
)]
#[must_use]
pub fn round_half_up_to_u32(value: f32) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    rounded.clamp(0.0, u32::MAX as f32) as u32
}

/// Floor an `f32` and clamp it into the `i32` domain.
///
/// `NaN` maps to zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let floored = f64::from(value).floor();
    let clamped = floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Convert a grid dimension to `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Grid dimensions are small enough to be exact in f32."
)]
#[must_use]
pub const fn usize_to_f32(value: usize) -> f32 {
    value as f32
}

/// Convert a height count to `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Heights are bounded by the floor layer count."
)]
#[must_use]
pub const fn u32_to_f32(value: u32) -> f32 {
    value as f32
}
