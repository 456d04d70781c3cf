//! Positioned, oriented bodies and overlap separation.
//!
//! Every body shares one record (pose and floor group). Static bodies only
//! ever sit where they were placed; dynamic bodies carry a circular
//! collider, translate along their heading and are pushed out of overlaps by
//! [`BodyArena::separate`].

use glam::Vec2;
use log::trace;

use crate::collision::{circle_overlap, CollisionSystem, Shape};
use crate::config::BodyConfig;
use crate::floors::{FloorGroup, FloorLayers};
use crate::level::Level;
use crate::vector_math::{heading, normalize_angle};

/// Handle of a body inside a [`BodyArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Wraps an arena slot.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Ground-plane position, height and heading.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Ground-plane x.
    pub x: f32,
    /// Ground-plane y.
    pub y: f32,
    /// Height above world zero.
    pub z: f32,
    /// Heading in radians, `[0, 2π)`.
    pub angle: f32,
}

impl Pose {
    /// Ground-plane position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Circular collider of a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Collider radius.
    pub radius: f32,
    /// Extra broad-phase margin.
    pub padding: f32,
}

impl Circle {
    /// Collider shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        Shape::Circle {
            radius: self.radius,
        }
    }
}

/// Whether a body can move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Immovable scenery.
    Static,
    /// Moving body with a circular collider.
    Dynamic(Circle),
}

/// A body's shared record plus its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pose: Pose,
    group: FloorGroup,
    kind: BodyKind,
}

impl Body {
    /// Scenery placed on the floor at `(x, y)`.
    #[must_use]
    pub fn new_static(x: f32, y: f32, level: &Level) -> Self {
        let mut body = Self {
            pose: Pose::default(),
            group: FloorGroup::default(),
            kind: BodyKind::Static,
        };
        body.set_position(x, y, level);
        body
    }

    /// Moving body standing on the floor at `(x, y)`.
    #[must_use]
    pub fn new_dynamic(x: f32, y: f32, angle: f32, config: &BodyConfig, level: &Level) -> Self {
        let mut body = Self {
            pose: Pose {
                angle: normalize_angle(angle),
                ..Pose::default()
            },
            group: FloorGroup::default(),
            kind: BodyKind::Dynamic(Circle {
                radius: config.radius,
                padding: config.padding,
            }),
        };
        body.set_position(x, y, level);
        body
    }

    /// Places the body on the floor at `(x, y)`.
    pub fn set_position(&mut self, x: f32, y: f32, level: &Level) {
        self.pose.x = x;
        self.pose.y = y;
        self.set_z(level.floor_z(x, y), level.layers());
    }

    /// Current pose.
    #[must_use]
    pub const fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Ground-plane position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.pose.position()
    }

    /// Current floor group.
    #[must_use]
    pub const fn group(&self) -> FloorGroup {
        self.group
    }

    /// Static or dynamic.
    #[must_use]
    pub const fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Collider of a dynamic body.
    #[must_use]
    pub const fn circle(&self) -> Option<Circle> {
        match self.kind {
            BodyKind::Dynamic(circle) => Some(circle),
            BodyKind::Static => None,
        }
    }

    /// Whether the body can move.
    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.kind, BodyKind::Dynamic(_))
    }

    /// Translates along the heading; negative distances move backwards.
    ///
    /// # Examples
    /// ```
    /// use spritefield::body::Body;
    /// # use spritefield::collision::CollisionSystem;
    /// # use spritefield::config::{EdgePolicy, SimConfig};
    /// # use spritefield::level::Level;
    /// # use spritefield::terrain::HeightField;
    /// # let mut config = SimConfig::default();
    /// # config.terrain.cols = 4;
    /// # config.terrain.rows = 4;
    /// # let field = HeightField::from_columns(vec![vec![0; 4]; 4], EdgePolicy::Open)?;
    /// # let level = Level::from_heights(field, &config, &mut CollisionSystem::default())?;
    /// let mut body = Body::new_dynamic(0.0, 0.0, 0.0, &config.body, &level);
    /// body.move_by(-1.5);
    /// assert!((body.pose().x + 1.5).abs() < 1e-6);
    /// # Ok::<(), spritefield::error::TerrainError>(())
    /// ```
    pub fn move_by(&mut self, distance: f32) {
        if !self.is_dynamic() {
            return;
        }
        let step = heading(self.pose.angle) * distance;
        self.pose.x += step.x;
        self.pose.y += step.y;
    }

    /// Shifts a dynamic body on the ground plane.
    pub const fn translate(&mut self, offset: Vec2) {
        if !self.is_dynamic() {
            return;
        }
        self.pose.x += offset.x;
        self.pose.y += offset.y;
    }

    /// Sets the heading, normalised into `[0, 2π)`.
    pub fn set_angle(&mut self, angle: f32) {
        self.pose.angle = normalize_angle(angle);
    }

    /// Sets the height and refreshes the floor group.
    pub fn set_z(&mut self, z: f32, layers: &FloorLayers) {
        self.pose.z = z;
        self.refresh_group(layers);
    }

    /// Recomputes the floor group from the current height.
    pub fn refresh_group(&mut self, layers: &FloorLayers) {
        self.group = layers.group_for_z(self.pose.z);
    }
}

/// Owner of every body in a session.
#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    bodies: Vec<Body>,
}

impl BodyArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `body` and returns its handle.
    pub fn insert(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    /// Body behind `id`.
    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Mutable body behind `id`.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Number of bodies.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.bodies.iter().enumerate().map(|(i, body)| (BodyId(i), body))
    }

    /// Pushes body `id` out of everything it overlaps and returns the number
    /// of overlaps resolved.
    ///
    /// Static colliders in the body's floor group are handled first and move
    /// only this body, by the full overlap scaled by
    /// `config.separation_static * time_scale`. `on_collide` fires for each
    /// such overlap whose floor, sampled at the obstacle centre, rises at
    /// most `config.step_tolerance` above the body. Dynamic bodies follow in
    /// registration order: this body retreats by
    /// `overlap * separation_dynamic * time_scale` and the other advances by
    /// twice that. Each overlap is measured against positions as already
    /// updated by earlier pushes.
    ///
    /// Static or unregistered bodies are left untouched.
    pub fn separate<F: FnMut()>(
        &mut self,
        id: BodyId,
        system: &CollisionSystem,
        level: &Level,
        config: &BodyConfig,
        time_scale: f32,
        mut on_collide: F,
    ) -> usize {
        let Some(body) = self.get(id) else {
            return 0;
        };
        let Some(circle) = body.circle() else {
            return 0;
        };
        if !system.is_registered(id) {
            return 0;
        }
        let group = body.group();
        let z = body.pose().z;
        let mut center = body.position();
        let mut resolved = 0;

        let query = circle.shape().aabb(center, circle.padding);
        for collider in system.statics_near(&query, group) {
            let Some(overlap) = circle_overlap(center, circle.radius, collider.position, collider.shape)
            else {
                continue;
            };
            center -= overlap * config.separation_static * time_scale;
            resolved += 1;
            let obstacle = collider.center();
            if level.floor_z(obstacle.x, obstacle.y) - z <= config.step_tolerance {
                on_collide();
            }
        }
        self.place(id, center);

        let share = config.separation_dynamic * time_scale;
        for &other in system.dynamic_ids() {
            if other == id {
                continue;
            }
            let Some(other_body) = self.get(other) else {
                continue;
            };
            let Some(other_circle) = other_body.circle() else {
                continue;
            };
            if !other_body.group().interacts(group) {
                continue;
            }
            let Some(overlap) =
                circle_overlap(center, circle.radius, other_body.position(), other_circle.shape())
            else {
                continue;
            };
            center -= overlap * share;
            self.place(id, center);
            if let Some(pushed) = self.get_mut(other) {
                pushed.translate(overlap * share * 2.0);
            }
            resolved += 1;
        }

        if resolved > 0 {
            trace!("body {id:?} resolved {resolved} overlaps");
        }
        resolved
    }

    fn place(&mut self, id: BodyId, center: Vec2) {
        if let Some(body) = self.get_mut(id) {
            body.pose.x = center.x;
            body.pose.y = center.y;
        }
    }
}

#[cfg(test)]
mod tests;
