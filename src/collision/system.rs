//! Static collider index and dynamic body registry.

use glam::Vec2;
use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::body::BodyId;
use crate::collision::shape::{Aabb, Shape};
use crate::floors::FloorGroup;
use crate::numeric::floor_to_i32;

/// Immovable collider placed by the terrain or a level edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    /// Circle centre or box minimum corner.
    pub position: Vec2,
    /// Collider geometry.
    pub shape: Shape,
    /// Floor layer the collider blocks.
    pub group: FloorGroup,
}

impl StaticCollider {
    /// Geometric centre of the collider.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.shape.center(self.position)
    }
}

type Bucket = (i32, i32);

/// Broad phase over static colliders plus the ordered set of dynamic bodies
/// taking part in separation.
///
/// Statics live in a uniform grid keyed by bucket coordinates. Dynamic
/// bodies keep their registration order, which is the order separation
/// visits them in, alongside a set for membership checks.
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    bucket_size: f32,
    statics: Vec<StaticCollider>,
    buckets: HashMap<Bucket, Vec<usize>>,
    dynamic: Vec<BodyId>,
    registered: HashSet<BodyId>,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CollisionSystem {
    /// Creates an empty system whose grid buckets are `bucket_size` wide.
    ///
    /// Non-positive or non-finite sizes fall back to one world unit.
    #[must_use]
    pub fn new(bucket_size: f32) -> Self {
        let size = if bucket_size.is_finite() && bucket_size > 0.0 {
            bucket_size
        } else {
            1.0
        };
        Self {
            bucket_size: size,
            statics: Vec::new(),
            buckets: HashMap::new(),
            dynamic: Vec::new(),
            registered: HashSet::new(),
        }
    }

    fn bucket_range(&self, aabb: &Aabb) -> (Bucket, Bucket) {
        let min = (
            floor_to_i32(aabb.min.x / self.bucket_size),
            floor_to_i32(aabb.min.y / self.bucket_size),
        );
        let max = (
            floor_to_i32(aabb.max.x / self.bucket_size),
            floor_to_i32(aabb.max.y / self.bucket_size),
        );
        (min, max)
    }

    /// Adds an immovable collider.
    pub fn insert_static(&mut self, position: Vec2, shape: Shape, group: FloorGroup) {
        let index = self.statics.len();
        self.statics.push(StaticCollider {
            position,
            shape,
            group,
        });
        let (min, max) = self.bucket_range(&shape.aabb(position, 0.0));
        for bx in min.0..=max.0 {
            for by in min.1..=max.1 {
                self.buckets.entry((bx, by)).or_default().push(index);
            }
        }
    }

    /// Registers a dynamic body; registering twice has no effect.
    pub fn insert(&mut self, body: BodyId) {
        if !self.registered.insert(body) {
            debug!("body {body:?} already registered");
            return;
        }
        self.dynamic.push(body);
    }

    /// Drops a dynamic body from separation.
    pub fn remove(&mut self, body: BodyId) {
        if self.registered.remove(&body) {
            self.dynamic.retain(|id| *id != body);
        }
    }

    /// Whether `body` takes part in separation.
    #[must_use]
    pub fn is_registered(&self, body: BodyId) -> bool {
        self.registered.contains(&body)
    }

    /// Dynamic bodies in registration order.
    #[must_use]
    pub fn dynamic_ids(&self) -> &[BodyId] {
        &self.dynamic
    }

    /// Number of static colliders.
    #[must_use]
    pub const fn static_count(&self) -> usize {
        self.statics.len()
    }

    /// Static colliders in `group` whose bounds touch `aabb`, in insertion
    /// order.
    #[must_use]
    pub fn statics_near(&self, aabb: &Aabb, group: FloorGroup) -> Vec<StaticCollider> {
        let (min, max) = self.bucket_range(aabb);
        let mut hits: Vec<usize> = Vec::new();
        for bx in min.0..=max.0 {
            for by in min.1..=max.1 {
                if let Some(bucket) = self.buckets.get(&(bx, by)) {
                    hits.extend(bucket.iter().copied());
                }
            }
        }
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter()
            .filter_map(|index| self.statics.get(index))
            .filter(|collider| collider.group.interacts(group))
            .filter(|collider| collider.shape.aabb(collider.position, 0.0).intersects(aabb))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(center: Vec2) -> Aabb {
        Shape::Circle { radius: 0.2 }.aabb(center, 0.1)
    }

    #[test]
    fn statics_are_filtered_by_group_and_distance() {
        let mut system = CollisionSystem::default();
        system.insert_static(Vec2::ZERO, Shape::UNIT_BOX, FloorGroup::new(0));
        system.insert_static(Vec2::ZERO, Shape::UNIT_BOX, FloorGroup::new(1));
        system.insert_static(Vec2::new(5.0, 5.0), Shape::UNIT_BOX, FloorGroup::new(0));

        let near = system.statics_near(&query(Vec2::new(1.1, 0.5)), FloorGroup::new(0));
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].group, FloorGroup::new(0));
        assert!(system
            .statics_near(&query(Vec2::new(3.0, 3.0)), FloorGroup::new(0))
            .is_empty());
        assert_eq!(system.static_count(), 3);
    }

    #[test]
    fn wide_colliders_are_reported_once() {
        let mut system = CollisionSystem::new(0.25);
        system.insert_static(
            Vec2::new(-1.0, -1.0),
            Shape::Box {
                width: 2.0,
                height: 2.0,
            },
            FloorGroup::new(0),
        );
        let near = system.statics_near(&query(Vec2::ZERO), FloorGroup::new(0));
        assert_eq!(near.len(), 1);
    }

    #[test]
    fn negative_coordinates_hash_correctly() {
        let mut system = CollisionSystem::default();
        system.insert_static(Vec2::new(-3.0, -2.0), Shape::UNIT_BOX, FloorGroup::new(2));
        let near = system.statics_near(&query(Vec2::new(-2.5, -1.5)), FloorGroup::new(2));
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].center(), Vec2::new(-2.5, -1.5));
    }

    #[test]
    fn registration_keeps_order_and_ignores_duplicates() {
        let mut system = CollisionSystem::default();
        system.insert(BodyId::new(3));
        system.insert(BodyId::new(1));
        system.insert(BodyId::new(3));
        assert_eq!(system.dynamic_ids(), &[BodyId::new(3), BodyId::new(1)]);
        system.remove(BodyId::new(3));
        assert!(!system.is_registered(BodyId::new(3)));
        assert!(system.is_registered(BodyId::new(1)));
    }

    #[test]
    fn membership_tracks_order_through_reregistration() {
        let mut system = CollisionSystem::default();
        for index in 0..64 {
            system.insert(BodyId::new(index));
        }
        system.remove(BodyId::new(10));
        system.remove(BodyId::new(10));
        assert_eq!(system.dynamic_ids().len(), 63);
        assert!(!system.is_registered(BodyId::new(10)));

        system.insert(BodyId::new(10));
        assert!(system.is_registered(BodyId::new(10)));
        assert_eq!(system.dynamic_ids().last(), Some(&BodyId::new(10)));
        assert_eq!(system.dynamic_ids().len(), 64);
    }
}
