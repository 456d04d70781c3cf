//! Smoothed third-person camera that trails a body.
//!
//! World ground coordinates `(x, y)` map to render space `(x, height, y)`.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use log::debug;

use crate::body::Body;
use crate::config::CameraConfig;
use crate::level::Level;
use crate::numeric::u32_to_f32;
use crate::vector_math::normalize_angle;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 85.0;
/// Near clipping plane.
pub const NEAR: f32 = 0.1;

/// Position and look-at point the camera eases towards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Point being looked at.
    pub look_at: Vec3,
    /// Heading the camera looks along.
    pub yaw: f32,
}

/// Chase camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    config: CameraConfig,
    distance: f32,
    aspect: f32,
    position: Vec3,
    look_at: Vec3,
    yaw: f32,
}

impl FollowCamera {
    /// Camera at the origin, raised to the configured height.
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        let start = Vec3::new(0.0, config.height, 0.0);
        Self {
            distance: config.distance,
            aspect: 1.0,
            position: start,
            look_at: start,
            yaw: 0.0,
            config,
        }
    }

    /// Where the camera wants to be while trailing `target`.
    ///
    /// The eye sits `distance` behind the heading and never below the floor
    /// under it.
    #[must_use]
    pub fn desired_pose(&self, target: &Body, level: &Level) -> CameraPose {
        let pose = target.pose();
        let adjusted = -pose.angle + FRAC_PI_2;
        let camera_x = pose.x - adjusted.sin() * self.distance;
        let camera_y = pose.y - adjusted.cos() * self.distance;
        let floor = u32_to_f32(level.get_floor(camera_x, camera_y)) / 2.0;
        let height = pose.z.max(floor);
        CameraPose {
            position: Vec3::new(camera_x, height + self.config.height, camera_y),
            look_at: Vec3::new(pose.x, height / 2.0 + self.config.height, pose.y),
            yaw: pose.angle,
        }
    }

    /// Eases towards `target` over `ms` milliseconds.
    ///
    /// Zero elapsed time snaps to the desired pose. Without a target nothing
    /// happens.
    pub fn update(&mut self, ms: f32, target: Option<&Body>, level: &Level) {
        let Some(body) = target else {
            return;
        };
        let desired = self.desired_pose(body, level);
        if ms > 0.0 {
            let t = (ms * self.config.lerp_ratio).min(1.0);
            self.position = self.position.lerp(desired.position, t);
            self.yaw = lerp_angle(self.yaw, desired.yaw, t);
        } else {
            self.position = desired.position;
            self.yaw = desired.yaw;
        }
        self.look_at = desired.look_at;
    }

    /// Adapts the trailing distance to a new viewport.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            debug!("ignoring degenerate viewport {width}x{height}");
            return;
        }
        self.aspect = width / height;
        self.distance = self.config.distance / self.aspect;
    }

    /// Eye position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Point being looked at.
    #[must_use]
    pub const fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Heading in `[0, 2π)`.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current trailing distance.
    #[must_use]
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Viewport aspect ratio.
    #[must_use]
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Far clipping plane.
    #[must_use]
    pub const fn far(&self) -> f32 {
        self.config.far
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

/// Interpolates along the shorter arc between two headings.
fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = normalize_angle(to - from);
    if delta > std::f32::consts::PI {
        delta -= std::f32::consts::TAU;
    }
    normalize_angle(from + delta * t)
}
