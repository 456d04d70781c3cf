//! The per-tick movement loop of a steerable sprite.
//!
//! Order is fixed: gear, rotation, gravity and jumping, translation,
//! separation, layer refresh with ground snap, then animation. Each step
//! reads the state the previous one left behind.

use log::trace;

use crate::body::BodyArena;
use crate::collision::CollisionSystem;
use crate::config::SimConfig;
use crate::input::InputState;
use crate::level::Level;
use crate::physics::{gear, integrate_vertical, rotate, rotation_sign, submerged_gear, VerticalState};
use crate::sprite::billboard::Billboard;

/// Vertical velocity and queued auto-hop carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    /// Vertical velocity.
    pub velocity: f32,
    /// Jump queued by bumping into a low step.
    pub pending_jump: bool,
}

/// Shared, read-only collaborators of the movement loop.
#[derive(Debug, Clone, Copy)]
pub struct MovementContext<'a> {
    /// Terrain for floor lookups.
    pub level: &'a Level,
    /// Colliders and registered bodies.
    pub system: &'a CollisionSystem,
    /// Tuning.
    pub config: &'a SimConfig,
}

/// What one movement step did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementReport {
    /// Gear applied after the water check.
    pub gear: f32,
    /// Overlaps resolved by separation.
    pub overlaps: usize,
    /// Whether a low step queued a hop.
    pub hop_queued: bool,
    /// Whether the frame advanced.
    pub animated: bool,
}

/// Advances the sprite shown by `billboard` by `ms` milliseconds.
///
/// `ms` is expected to be clamped by the caller. Zero elapsed time and
/// missing or static bodies leave everything untouched.
pub fn step_movement(
    bodies: &mut BodyArena,
    billboard: &mut Billboard,
    state: &mut MovementState,
    input: &InputState,
    ctx: MovementContext<'_>,
    ms: f32,
) -> MovementReport {
    let mut report = MovementReport::default();
    if ms <= 0.0 || ms.is_nan() {
        return report;
    }
    let movement = &ctx.config.movement;
    let layers = ctx.level.layers();
    let dt = ms * 0.001;
    let id = billboard.body_id();

    let Some(body) = bodies.get_mut(id).filter(|candidate| candidate.is_dynamic()) else {
        return report;
    };
    let pose = *body.pose();

    let drive = submerged_gear(
        gear(&input.keys, &input.pointer),
        pose.z,
        movement.water_z,
        movement.submerged_factor,
    );
    report.gear = drive;

    let sign = rotation_sign(&input.keys, &input.pointer);
    if sign != 0.0 {
        body.set_angle(rotate(pose.angle, movement.rotate_speed, drive, dt, sign));
    }

    let jump = input.keys.space || state.pending_jump;
    state.pending_jump = false;
    let vertical = integrate_vertical(
        VerticalState {
            z: pose.z,
            velocity: state.velocity,
        },
        ctx.level.floor_z(pose.x, pose.y),
        jump,
        dt,
        movement,
    );
    state.velocity = vertical.velocity;
    body.set_z(vertical.z, layers);

    if drive != 0.0 {
        body.move_by(drive * movement.move_speed * dt);
    }

    let mut bumped = false;
    report.overlaps = bodies.separate(id, ctx.system, ctx.level, &ctx.config.body, 1.0, || {
        bumped = true;
    });
    if bumped && drive != 0.0 {
        state.pending_jump = true;
        report.hop_queued = true;
        trace!("body {id:?} queued a hop");
    }

    if let Some(moved) = bodies.get_mut(id) {
        let settled = *moved.pose();
        let floor_z = ctx.level.floor_z(settled.x, settled.y);
        if settled.z < floor_z {
            state.velocity = 0.0;
            moved.set_z(floor_z, layers);
        } else {
            moved.refresh_group(layers);
        }
    }

    if input.active() {
        let sheet = *billboard.sheet();
        billboard.animation_mut().advance(ms, &sheet);
        report.animated = true;
    }
    report
}

#[cfg(test)]
mod tests;
