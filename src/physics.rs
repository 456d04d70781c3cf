//! Per-tick movement helpers.
//!
//! Pure functions over plain values so the movement loop, NPC brains and
//! tests can share them. Nothing here touches a body or the collision
//! system.

use crate::config::MovementConfig;
use crate::input::{KeyState, Pointer};
use crate::vector_math::normalize_angle;

/// Height and vertical velocity of a body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalState {
    /// Height above world zero.
    pub z: f32,
    /// Vertical velocity, scaled by the jump speed when integrated.
    pub velocity: f32,
}

/// Clamps a host frame delta to `[0, max_ms]`; `NaN` becomes zero.
///
/// # Examples
/// ```
/// use spritefield::physics::frame_delta_ms;
/// assert_eq!(frame_delta_ms(16.0, 50.0), 16.0);
/// assert_eq!(frame_delta_ms(250.0, 50.0), 50.0);
/// assert_eq!(frame_delta_ms(-3.0, 50.0), 0.0);
/// ```
#[must_use]
pub const fn frame_delta_ms(raw: f32, max_ms: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, max_ms.max(0.0))
}

/// Forward drive: `+1` forward, `-1` backward, `0` when both or neither
/// key is held. Without keys a pointer drag drives by its height.
#[must_use]
pub const fn gear(keys: &KeyState, pointer: &Pointer) -> f32 {
    match (keys.up, keys.down) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        (true, true) => 0.0,
        (false, false) if pointer.down => (-pointer.y).clamp(-1.0, 1.0),
        (false, false) => 0.0,
    }
}

/// Scales `gear` by `factor` while the body is below the water line.
#[must_use]
pub const fn submerged_gear(gear: f32, z: f32, water_z: f32, factor: f32) -> f32 {
    if z < water_z {
        gear * factor
    } else {
        gear
    }
}

/// Turn direction: `-1` left, `+1` right, the pointer's x during a drag,
/// otherwise `0`.
#[must_use]
pub const fn rotation_sign(keys: &KeyState, pointer: &Pointer) -> f32 {
    if keys.left {
        -1.0
    } else if keys.right {
        1.0
    } else if pointer.down {
        pointer.x
    } else {
        0.0
    }
}

/// Turns `angle` by `rotate_speed · (gear or 1) · dt · sign`.
///
/// Reversing flips the turn, as it would for a car.
#[must_use]
pub fn rotate(angle: f32, rotate_speed: f32, gear: f32, dt: f32, sign: f32) -> f32 {
    let drive = if gear == 0.0 { 1.0 } else { gear };
    normalize_angle(angle + rotate_speed * drive * dt * sign)
}

/// One step of gravity and jumping against the floor at `floor_z`.
///
/// Airborne bodies accelerate downwards. Grounded bodies launch at
/// `jump_speed` when `jump` is set and otherwise stop. Bodies below the
/// floor stop. The new height never drops below the floor or world zero.
///
/// # Examples
/// ```
/// use spritefield::config::MovementConfig;
/// use spritefield::physics::{integrate_vertical, VerticalState};
///
/// let config = MovementConfig::default();
/// let launched = integrate_vertical(VerticalState::default(), 0.0, true, 0.016, &config);
/// assert!((launched.velocity - 2.1).abs() < 1e-6);
/// assert!(launched.z > 0.0);
/// ```
#[must_use]
pub const fn integrate_vertical(
    state: VerticalState,
    floor_z: f32,
    jump: bool,
    dt: f32,
    config: &MovementConfig,
) -> VerticalState {
    let grounded = (state.z - floor_z).abs() <= f32::EPSILON;
    let velocity = if grounded {
        if jump {
            config.jump_speed
        } else {
            0.0
        }
    } else if state.z > floor_z {
        state.velocity - config.gravity * dt
    } else {
        0.0
    };
    let z = (state.z + velocity * config.jump_speed * dt)
        .max(floor_z)
        .max(0.0);
    VerticalState { z, velocity }
}
