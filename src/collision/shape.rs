//! Collider shapes and the circle narrow phase.
//!
//! Circles are positioned by their centre, boxes by their minimum corner.
//! Contacts come from `parry2d`. Every overlap vector follows one
//! convention: subtracting it from the circle's centre moves the circle out
//! of the other shape.

use glam::Vec2;
use parry2d::math::{Isometry, Vector};
use parry2d::query;
use parry2d::shape::{Ball, Cuboid};

/// Geometry of a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Circle around its position.
    Circle {
        /// Circle radius.
        radius: f32,
    },
    /// Axis-aligned box extending from its position.
    Box {
        /// Extent along x.
        width: f32,
        /// Extent along y.
        height: f32,
    },
}

impl Shape {
    /// Unit box covering one terrain cell.
    pub const UNIT_BOX: Self = Self::Box {
        width: 1.0,
        height: 1.0,
    };

    /// Geometric centre of the shape placed at `position`.
    #[must_use]
    pub fn center(&self, position: Vec2) -> Vec2 {
        match *self {
            Self::Circle { .. } => position,
            Self::Box { width, height } => position + Vec2::new(width, height) / 2.0,
        }
    }

    /// Bounding box of the shape at `position`, grown by `padding`.
    #[must_use]
    pub fn aabb(&self, position: Vec2, padding: f32) -> Aabb {
        let pad = Vec2::splat(padding);
        match *self {
            Self::Circle { radius } => {
                let extent = Vec2::splat(radius);
                Aabb::new(position - extent - pad, position + extent + pad)
            }
            Self::Box { width, height } => {
                Aabb::new(position - pad, position + Vec2::new(width, height) + pad)
            }
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec2,
    /// Maximum corner.
    pub max: Vec2,
}

impl Aabb {
    /// Box spanning `min..max`.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whether two boxes touch or overlap.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// Overlap of a circle with another shape, if they penetrate.
///
/// Touching without penetration is not an overlap.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use spritefield::collision::{circle_overlap, Shape};
///
/// let v = circle_overlap(Vec2::ZERO, 0.2, Vec2::new(0.3, 0.0), Shape::Circle { radius: 0.3 })
///     .expect("circles overlap");
/// assert!((v.x - 0.2).abs() < 1e-5);
/// assert!(v.y.abs() < 1e-5);
/// ```
#[must_use]
pub fn circle_overlap(center: Vec2, radius: f32, other_position: Vec2, other: Shape) -> Option<Vec2> {
    let ball = Ball::new(radius);
    let at = isometry(center);
    let hit = match other {
        Shape::Circle {
            radius: other_radius,
        } => query::contact(&at, &ball, &isometry(other_position), &Ball::new(other_radius), 0.0),
        Shape::Box { width, height } => {
            let cuboid = Cuboid::new(Vector::new(width / 2.0, height / 2.0));
            query::contact(&at, &ball, &isometry(other.center(other_position)), &cuboid, 0.0)
        }
    };
    let contact = hit.ok().flatten()?;
    if contact.dist >= 0.0 {
        return None;
    }
    let normal = contact.normal1.into_inner();
    Some(Vec2::new(normal.x, normal.y) * -contact.dist)
}

fn isometry(position: Vec2) -> Isometry<f32> {
    Isometry::translation(position.x, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn separated_circles_do_not_overlap() {
        let hit = circle_overlap(Vec2::ZERO, 0.2, Vec2::new(0.5, 0.0), Shape::Circle { radius: 0.3 });
        assert_eq!(hit, None);
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        let hit = circle_overlap(Vec2::ZERO, 0.25, Vec2::new(0.5, 0.0), Shape::Circle { radius: 0.25 });
        assert_eq!(hit, None);
    }

    #[test]
    fn coincident_circles_push_by_both_radii() {
        let hit = circle_overlap(Vec2::ONE, 0.2, Vec2::ONE, Shape::Circle { radius: 0.2 })
            .expect("overlap");
        assert_relative_eq!(hit.length(), 0.4, epsilon = 1e-4);
    }

    #[rstest]
    #[case::left_face(Vec2::new(-0.1, 0.5), Vec2::new(0.1, 0.0))]
    #[case::top_face(Vec2::new(0.5, 1.15), Vec2::new(0.0, -0.05))]
    #[case::inside_near_left(Vec2::new(0.1, 0.5), Vec2::new(0.3, 0.0))]
    #[case::inside_near_top(Vec2::new(0.5, 0.95), Vec2::new(0.0, -0.25))]
    fn circle_box_overlaps(#[case] center: Vec2, #[case] expected: Vec2) {
        let hit = circle_overlap(center, 0.2, Vec2::ZERO, Shape::UNIT_BOX).expect("overlap");
        assert_relative_eq!(hit.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(hit.y, expected.y, epsilon = 1e-4);
        let resolved = center - hit;
        assert!(circle_overlap(resolved, 0.2 - 1e-3, Vec2::ZERO, Shape::UNIT_BOX).is_none());
    }

    #[test]
    fn circle_clear_of_box_corner() {
        let hit = circle_overlap(Vec2::new(1.2, 1.2), 0.2, Vec2::ZERO, Shape::UNIT_BOX);
        assert_eq!(hit, None);
    }

    #[test]
    fn offset_box_is_measured_from_its_corner() {
        let cell = Vec2::new(3.0, -2.0);
        let hit = circle_overlap(Vec2::new(2.9, -1.5), 0.2, cell, Shape::UNIT_BOX).expect("overlap");
        assert_relative_eq!(hit.x, 0.1, epsilon = 1e-4);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn aabb_accounts_for_padding() {
        let circle = Shape::Circle { radius: 0.2 }.aabb(Vec2::ZERO, 0.1);
        assert_relative_eq!(circle.min.x, -0.3);
        assert_relative_eq!(circle.max.y, 0.3);
        let cell = Shape::UNIT_BOX.aabb(Vec2::new(2.0, 3.0), 0.0);
        assert!(cell.intersects(&Aabb::new(Vec2::new(2.9, 3.9), Vec2::new(4.0, 4.0))));
        assert!(!cell.intersects(&Aabb::new(Vec2::new(3.1, 3.0), Vec2::new(4.0, 4.0))));
        assert_eq!(Shape::UNIT_BOX.center(Vec2::new(2.0, 3.0)), Vec2::new(2.5, 3.5));
    }
}
