//! Entity kinds: the player, wandering NPCs and static scenery.

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::assets::TextureRegistry;
use crate::body::{Body, BodyArena, BodyId, Pose};
use crate::capability::{Directional, Renderable, Steerable, TickContext};
use crate::collision::CollisionSystem;
use crate::config::{NpcConfig, SimConfig};
use crate::input::InputState;
use crate::level::Level;
use crate::numeric::usize_to_f32;
use crate::sprite::{
    step_movement, Billboard, BillboardOptions, MovementReport, MovementState, SpriteMesh,
    SpriteSheet, Steering,
};
use crate::terrain::{PropKind, PropPlacement};
use crate::vector_math::angle_towards;

/// Texture key of the player sprite.
pub const PLAYER_TEXTURE: &str = "player";
/// Texture key of NPC sprites.
pub const NPC_TEXTURE: &str = "npc";

const CHARACTER_SCALE: f32 = 1.25;

fn character_options(texture: &str, frame_duration_ms: f32) -> BillboardOptions {
    BillboardOptions::new(texture, CHARACTER_SCALE).with_sheet(SpriteSheet {
        frame_duration_ms,
        ..SpriteSheet::CHARACTER
    })
}

fn spawn_dynamic(
    x: f32,
    y: f32,
    bodies: &mut BodyArena,
    system: &mut CollisionSystem,
    level: &Level,
    config: &SimConfig,
) -> BodyId {
    let id = bodies.insert(Body::new_dynamic(x, y, 0.0, &config.body, level));
    system.insert(id);
    id
}

fn pose_of(bodies: &BodyArena, id: BodyId) -> Option<Pose> {
    bodies.get(id).map(|body| *body.pose())
}

/// The user-controlled character.
#[derive(Debug, Clone)]
pub struct Player {
    billboard: Billboard,
    motion: MovementState,
    last_report: MovementReport,
}

impl Player {
    /// Spawns the player at the world origin.
    pub fn spawn(
        bodies: &mut BodyArena,
        system: &mut CollisionSystem,
        level: &Level,
        config: &SimConfig,
        assets: &TextureRegistry,
    ) -> Self {
        let id = spawn_dynamic(0.0, 0.0, bodies, system, level, config);
        debug!("spawned player {id:?} at (0, 0)");
        Self {
            billboard: Billboard::new(
                id,
                &character_options(PLAYER_TEXTURE, config.npc.frame_duration_ms),
                assets,
            ),
            motion: MovementState::default(),
            last_report: MovementReport::default(),
        }
    }

    /// Outcome of the latest movement step.
    #[must_use]
    pub const fn last_report(&self) -> &MovementReport {
        &self.last_report
    }
}

impl Renderable for Player {
    fn mesh(&self) -> &SpriteMesh {
        self.billboard.mesh()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, ms: f32) {
        let movement = ctx.movement();
        self.last_report = step_movement(
            ctx.bodies,
            &mut self.billboard,
            &mut self.motion,
            ctx.input,
            movement,
            ms,
        );
        if let Some(body) = ctx.bodies.get(self.billboard.body_id()) {
            self.billboard.refresh(Steering::Player, body, &ctx.view, ctx.input);
        }
    }
}

impl Directional for Player {
    fn billboard(&self) -> &Billboard {
        &self.billboard
    }
}

impl Steerable for Player {
    fn body_id(&self) -> BodyId {
        self.billboard.body_id()
    }

    fn movement(&self) -> &MovementState {
        &self.motion
    }
}

/// Random wandering that writes an NPC's own controls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NpcBrain {
    rotation_timer_ms: f32,
}

impl NpcBrain {
    /// Updates `input` after `ms` milliseconds and returns a new heading
    /// when the NPC strayed too far and turns back.
    ///
    /// Every `rotation_interval_ms` the turn keys are released and, with
    /// chance `ms · rotate_chance`, one of them is pressed. Forward is
    /// re-rolled every tick and jumping has chance `ms · jump_chance`.
    /// Beyond `radius` from the origin the NPC heads home with probability
    /// `excess / radius`.
    pub fn think<R: Rng>(
        &mut self,
        input: &mut InputState,
        pose: &Pose,
        radius: f32,
        config: &NpcConfig,
        ms: f32,
        rng: &mut R,
    ) -> Option<f32> {
        let position = pose.position();
        let excess = position.length() - radius;
        let heading = (radius > 0.0 && excess > 0.0 && rng.gen::<f32>() < excess / radius)
            .then(|| angle_towards(position, Vec2::ZERO));

        self.rotation_timer_ms -= ms;
        if self.rotation_timer_ms < 0.0 {
            self.rotation_timer_ms = config.rotation_interval_ms;
            input.keys.left = false;
            input.keys.right = false;
            if rng.gen::<f32>() < ms * config.rotate_chance {
                if rng.gen::<f32>() < 0.5 {
                    input.keys.left = true;
                } else {
                    input.keys.right = true;
                }
            }
        }

        input.keys.up = rng.gen::<f32>() < config.walk_chance;
        input.keys.space = rng.gen::<f32>() < ms * config.jump_chance;
        heading
    }
}

/// A computer-controlled wanderer.
#[derive(Debug, Clone)]
pub struct Npc {
    billboard: Billboard,
    motion: MovementState,
    input: InputState,
    brain: NpcBrain,
}

impl Npc {
    /// Spawns an NPC at a random point in the central half of the level.
    pub fn spawn<R: Rng>(
        bodies: &mut BodyArena,
        system: &mut CollisionSystem,
        level: &Level,
        config: &SimConfig,
        assets: &TextureRegistry,
        rng: &mut R,
    ) -> Self {
        let x = (rng.gen::<f32>() - 0.5) * usize_to_f32(level.cols()) * 0.5;
        let y = (rng.gen::<f32>() - 0.5) * usize_to_f32(level.rows()) * 0.5;
        let id = spawn_dynamic(x, y, bodies, system, level, config);
        debug!("spawned npc {id:?} at ({x:.2}, {y:.2})");
        Self {
            billboard: Billboard::new(
                id,
                &character_options(NPC_TEXTURE, config.npc.frame_duration_ms),
                assets,
            ),
            motion: MovementState::default(),
            input: InputState::default(),
            brain: NpcBrain::default(),
        }
    }

    /// Controls written by the brain.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }
}

impl Renderable for Npc {
    fn mesh(&self) -> &SpriteMesh {
        self.billboard.mesh()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, ms: f32) {
        let id = self.billboard.body_id();
        let movement = ctx.movement();
        step_movement(
            ctx.bodies,
            &mut self.billboard,
            &mut self.motion,
            &self.input,
            movement,
            ms,
        );
        if let Some(body) = ctx.bodies.get(id) {
            self.billboard
                .refresh(Steering::CameraRelative, body, &ctx.view, &self.input);
        }

        let Some(pose) = pose_of(ctx.bodies, id) else {
            return;
        };
        let radius = usize_to_f32(ctx.level.cols() + ctx.level.rows()) / 2.0;
        let turn = self
            .brain
            .think(&mut self.input, &pose, radius, &ctx.config.npc, ms, ctx.rng);
        if let (Some(angle), Some(body)) = (turn, ctx.bodies.get_mut(id)) {
            body.set_angle(angle);
        }
    }
}

impl Directional for Npc {
    fn billboard(&self) -> &Billboard {
        &self.billboard
    }
}

impl Steerable for Npc {
    fn body_id(&self) -> BodyId {
        self.billboard.body_id()
    }

    fn movement(&self) -> &MovementState {
        &self.motion
    }
}

/// Static scenery such as a tree or bush.
#[derive(Debug, Clone)]
pub struct Prop {
    kind: PropKind,
    billboard: Billboard,
}

impl Prop {
    /// Places scenery on the floor at `placement`.
    pub fn spawn(
        placement: &PropPlacement,
        bodies: &mut BodyArena,
        level: &Level,
        assets: &TextureRegistry,
    ) -> Self {
        let id = bodies.insert(Body::new_static(placement.x, placement.y, level));
        let options = BillboardOptions::new(placement.kind.texture_name(), placement.kind.scale());
        Self {
            kind: placement.kind,
            billboard: Billboard::new(id, &options, assets),
        }
    }

    /// Tree or bush.
    #[must_use]
    pub const fn kind(&self) -> PropKind {
        self.kind
    }
}

impl Renderable for Prop {
    fn mesh(&self) -> &SpriteMesh {
        self.billboard.mesh()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, _ms: f32) {
        if let Some(body) = ctx.bodies.get(self.billboard.body_id()) {
            self.billboard
                .refresh(Steering::CameraRelative, body, &ctx.view, ctx.input);
        }
    }
}

impl Directional for Prop {
    fn billboard(&self) -> &Billboard {
        &self.billboard
    }
}
