//! Tests for the movement loop.

use approx::assert_relative_eq;
use rstest::rstest;

use super::*;
use crate::assets::TextureRegistry;
use crate::body::{Body, Pose};
use crate::config::EdgePolicy;
use crate::input::{KeyState, Pointer};
use crate::sprite::billboard::BillboardOptions;
use crate::sprite::sheet::SpriteSheet;
use crate::terrain::HeightField;

struct Rig {
    config: SimConfig,
    level: Level,
    system: CollisionSystem,
    bodies: BodyArena,
    billboard: Billboard,
    state: MovementState,
}

impl Rig {
    fn new(columns: Vec<Vec<u32>>, x: f32, y: f32) -> Self {
        let mut config = SimConfig::default();
        config.terrain.cols = columns.len();
        config.terrain.rows = columns[0].len();
        let field = HeightField::from_columns(columns, EdgePolicy::Open).expect("grid");
        let mut system = CollisionSystem::default();
        let level = Level::from_heights(field, &config, &mut system).expect("level");
        let mut bodies = BodyArena::new();
        let id = bodies.insert(Body::new_dynamic(x, y, 0.0, &config.body, &level));
        system.insert(id);
        let options = BillboardOptions::new("player", 1.0).with_sheet(SpriteSheet::CHARACTER);
        let billboard = Billboard::new(id, &options, &TextureRegistry::new());
        Self {
            config,
            level,
            system,
            bodies,
            billboard,
            state: MovementState::default(),
        }
    }

    fn flat(height: u32) -> Self {
        Self::new(vec![vec![height; 8]; 8], 0.0, 0.0)
    }

    fn step(&mut self, input: &InputState, ms: f32) -> MovementReport {
        let ctx = MovementContext {
            level: &self.level,
            system: &self.system,
            config: &self.config,
        };
        step_movement(
            &mut self.bodies,
            &mut self.billboard,
            &mut self.state,
            input,
            ctx,
            ms,
        )
    }

    fn pose(&self) -> Pose {
        *self
            .bodies
            .get(self.billboard.body_id())
            .expect("body")
            .pose()
    }
}

fn pressing(keys: KeyState) -> InputState {
    InputState::from_controls(keys, Pointer::default())
}

fn forward() -> InputState {
    pressing(KeyState {
        up: true,
        ..KeyState::default()
    })
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f32::NAN)]
fn degenerate_time_is_a_no_op(#[case] ms: f32) {
    let mut rig = Rig::flat(2);
    let before = rig.pose();
    let report = rig.step(&forward(), ms);
    assert_eq!(rig.pose(), before);
    assert_eq!(report, MovementReport::default());
}

#[rstest]
#[case::dry(2, 0.048)]
#[case::submerged(0, 0.024)]
fn forward_speed_depends_on_water(#[case] height: u32, #[case] expected_x: f32) {
    let mut rig = Rig::flat(height);
    rig.step(&forward(), 16.0);
    assert_relative_eq!(rig.pose().x, expected_x, epsilon = 1e-6);
    assert_relative_eq!(rig.pose().y, 0.0, epsilon = 1e-6);
}

#[test]
fn turning_keys_rotate_the_heading() {
    let mut rig = Rig::flat(2);
    rig.step(
        &pressing(KeyState {
            right: true,
            ..KeyState::default()
        }),
        100.0,
    );
    assert_relative_eq!(rig.pose().angle, 0.3, epsilon = 1e-6);
}

#[test]
fn jump_rises_then_lands() {
    let mut rig = Rig::flat(0);
    let jump = pressing(KeyState {
        space: true,
        ..KeyState::default()
    });
    rig.step(&jump, 16.0);
    assert_relative_eq!(rig.state.velocity, 2.1);
    let mut heights = vec![rig.pose().z];
    for _ in 0..200 {
        rig.step(&InputState::default(), 16.0);
        heights.push(rig.pose().z);
    }
    let apex = heights
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(i, _)| i);
    assert!(heights[apex] > heights[0]);
    assert!(heights[apex..].windows(2).all(|w| w[1] <= w[0]));
    assert_relative_eq!(*heights.last().expect("samples"), 0.0);
}

#[test]
fn bumping_a_low_step_queues_a_hop() {
    let mut columns = vec![vec![0; 8]; 8];
    columns[5] = vec![1; 8];
    let mut rig = Rig::new(columns, 0.85, 0.5);

    let report = rig.step(&forward(), 16.0);
    assert!(report.hop_queued);
    assert!(report.overlaps > 0);
    assert!(rig.pose().x <= 0.8 + 1e-5);

    rig.step(&InputState::default(), 16.0);
    assert_relative_eq!(rig.state.velocity, 2.1);
    assert!(!rig.state.pending_jump);
}

#[test]
fn bodies_below_ground_are_snapped_up() {
    let mut rig = Rig::flat(3);
    let id = rig.billboard.body_id();
    let layers = rig.level.layers().clone();
    rig.bodies.get_mut(id).expect("body").set_z(0.2, &layers);
    rig.state.velocity = -3.0;
    rig.step(&InputState::default(), 16.0);
    assert_relative_eq!(rig.pose().z, 1.5);
    assert_relative_eq!(rig.state.velocity, 0.0);
    assert_eq!(rig.bodies.get(id).expect("body").group().index(), 3);
}

#[test]
fn frames_advance_only_while_steering() {
    let mut rig = Rig::flat(2);
    let idle = rig.step(&InputState::default(), 50.0);
    assert!(!idle.animated);
    assert_relative_eq!(rig.billboard.animation().frame, 0.0);

    let moving = rig.step(&forward(), 60.0);
    assert!(moving.animated);
    assert_relative_eq!(rig.billboard.animation().frame, 0.5);
}

#[test]
fn static_bodies_are_ignored() {
    let mut rig = Rig::flat(2);
    let scenery = rig.bodies.insert(Body::new_static(1.0, 1.0, &rig.level));
    let options = BillboardOptions::new("tree", 1.5);
    rig.billboard = Billboard::new(scenery, &options, &TextureRegistry::new());
    let before = rig.pose();
    let report = rig.step(&forward(), 16.0);
    assert_eq!(rig.pose(), before);
    assert_relative_eq!(report.gear, 0.0);
}
