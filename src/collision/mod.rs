//! Two-dimensional collision: shapes, the `parry2d` narrow phase and the
//! body registry.
//!
//! Terrain is flattened into layered 2D colliders, so everything here works
//! on the ground plane. Height only enters through [`crate::floors::FloorGroup`]
//! filtering.

pub mod shape;
pub mod system;

pub use shape::{circle_overlap, Aabb, Shape};
pub use system::{CollisionSystem, StaticCollider};
