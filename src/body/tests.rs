//! Tests for body placement and separation.

use approx::assert_relative_eq;
use rstest::{fixture, rstest};

use super::*;
use crate::config::{EdgePolicy, SimConfig};
use crate::terrain::HeightField;

/// 4×4 level whose cell (3, 2), world `[1, 2) × [0, 1)`, has `step` height.
fn level_with_step(step: u32, system: &mut CollisionSystem) -> Level {
    let mut columns = vec![vec![0; 4]; 4];
    columns[3][2] = step;
    let mut config = SimConfig::default();
    config.terrain.cols = 4;
    config.terrain.rows = 4;
    let field = HeightField::from_columns(columns, EdgePolicy::Open).expect("grid");
    Level::from_heights(field, &config, system).expect("level")
}

#[fixture]
fn config() -> BodyConfig {
    BodyConfig::default()
}

#[rstest]
fn static_bodies_stand_on_the_floor(config: BodyConfig) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(3, &mut system);
    let mut body = Body::new_static(1.5, 0.5, &level);
    assert_relative_eq!(body.pose().z, 1.5);
    assert_eq!(body.group(), FloorGroup::new(3));
    body.move_by(2.0);
    body.translate(Vec2::ONE);
    assert_eq!(body.position(), Vec2::new(1.5, 0.5));

    let dynamic = Body::new_dynamic(1.5, 0.5, -1.0, &config, &level);
    assert!(dynamic.pose().angle >= 0.0);
    assert!(dynamic.is_dynamic());
}

#[rstest]
fn separation_clears_a_static_circle(config: BodyConfig) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(0, &mut system);
    let mut arena = BodyArena::new();
    let id = arena.insert(Body::new_dynamic(0.0, 0.0, 0.0, &config, &level));
    system.insert(id);
    system.insert_static(Vec2::new(0.3, 0.0), Shape::Circle { radius: 0.3 }, FloorGroup::new(0));

    let resolved = arena.separate(id, &system, &level, &config, 1.0, || {});
    assert_eq!(resolved, 1);
    let body = arena.get(id).expect("body");
    let distance = body.position().distance(Vec2::new(0.3, 0.0));
    assert!(distance >= 0.5 - 1e-5, "distance {distance}");
}

#[rstest]
#[case::one_step_fires(1, true)]
#[case::cliff_is_silent(3, false)]
fn collide_callback_tracks_step_height(
    config: BodyConfig,
    #[case] step: u32,
    #[case] expect_callback: bool,
) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(step, &mut system);
    let mut arena = BodyArena::new();
    let id = arena.insert(Body::new_dynamic(0.85, 0.5, 0.0, &config, &level));
    system.insert(id);

    let mut fired = 0;
    arena.separate(id, &system, &level, &config, 1.0, || fired += 1);
    assert_eq!(fired > 0, expect_callback);
    let body = arena.get(id).expect("body");
    assert_relative_eq!(body.pose().x, 0.8, epsilon = 1e-5);
}

#[rstest]
fn dynamic_overlap_is_shared(config: BodyConfig) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(0, &mut system);
    let mut arena = BodyArena::new();
    let a = arena.insert(Body::new_dynamic(0.0, 0.0, 0.0, &config, &level));
    let b = arena.insert(Body::new_dynamic(0.3, 0.0, 0.0, &config, &level));
    system.insert(a);
    system.insert(b);

    arena.separate(a, &system, &level, &config, 1.0, || {});
    let a_x = arena.get(a).expect("a").pose().x;
    let b_x = arena.get(b).expect("b").pose().x;
    assert_relative_eq!(a_x, -0.033, epsilon = 1e-5);
    assert_relative_eq!(b_x, 0.366, epsilon = 1e-5);
}

#[rstest]
fn bodies_on_other_layers_pass_through(config: BodyConfig) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(0, &mut system);
    let mut arena = BodyArena::new();
    let a = arena.insert(Body::new_dynamic(0.0, 0.0, 0.0, &config, &level));
    let b = arena.insert(Body::new_dynamic(0.1, 0.0, 0.0, &config, &level));
    arena.get_mut(b).expect("b").set_z(2.0, level.layers());
    system.insert(a);
    system.insert(b);
    assert_eq!(arena.separate(a, &system, &level, &config, 1.0, || {}), 0);
}

#[rstest]
fn unregistered_and_static_bodies_do_not_separate(config: BodyConfig) {
    let mut system = CollisionSystem::default();
    let level = level_with_step(1, &mut system);
    let mut arena = BodyArena::new();
    let loose = arena.insert(Body::new_dynamic(0.85, 0.5, 0.0, &config, &level));
    let scenery = arena.insert(Body::new_static(0.85, 0.5, &level));
    system.insert(scenery);

    assert_eq!(arena.separate(loose, &system, &level, &config, 1.0, || {}), 0);
    assert_eq!(arena.separate(scenery, &system, &level, &config, 1.0, || {}), 0);
    assert_eq!(arena.separate(BodyId::new(99), &system, &level, &config, 1.0, || {}), 0);
    assert_relative_eq!(arena.get(loose).expect("body").pose().x, 0.85);
}
