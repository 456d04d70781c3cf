//! A single simulation session and its fixed per-tick ordering.
//!
//! [`Session::tick`] clamps the frame delta, moves the player, then every
//! NPC in spawn order, then refreshes the scenery and finally eases the
//! camera. Every body has finished moving and separating before the camera
//! reads the player's position, and no body ends a tick below the floor.

use log::{info, trace, warn};

use crate::assets::TextureRegistry;
use crate::body::{Body, BodyArena};
use crate::camera::FollowCamera;
use crate::capability::{Renderable, Steerable, TickContext};
use crate::collision::CollisionSystem;
use crate::config::SimConfig;
use crate::entity::{Npc, Player, Prop};
use crate::error::SessionError;
use crate::input::InputState;
use crate::level::Level;
use crate::physics::frame_delta_ms;
use crate::sim_rng::SimRng;
use crate::sprite::{MovementReport, ViewContext};
use crate::terrain::HeightField;

/// Summary of one [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Milliseconds simulated after clamping.
    pub ms: f32,
    /// Whether the raw delta exceeded the cap.
    pub clamped: bool,
    /// What the player's movement step did.
    pub player: MovementReport,
}

/// Owns every piece of one running game.
#[derive(Debug, Clone)]
pub struct Session {
    config: SimConfig,
    level: Level,
    system: CollisionSystem,
    bodies: BodyArena,
    input: InputState,
    camera: FollowCamera,
    player: Player,
    npcs: Vec<Npc>,
    props: Vec<Prop>,
    rng: SimRng,
    ticks: u64,
    elapsed_ms: f64,
}

impl Session {
    /// Generates a level from `seed` and populates it.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] when `config` fails validation.
    pub fn new(config: SimConfig, seed: u64, assets: &TextureRegistry) -> Result<Self, SessionError> {
        config.validate()?;
        let mut rng = SimRng::from_seed_u64(seed);
        let mut system = CollisionSystem::default();
        let level = Level::generate(&config, assets, &mut rng, &mut system);
        Ok(Self::populate(config, level, system, rng, assets))
    }

    /// Builds a session on an explicit height field. No scenery is
    /// scattered; `seed` still drives NPC placement and behaviour.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] for an invalid configuration and
    /// [`SessionError::Terrain`] when the field does not match it.
    pub fn with_heights(
        config: SimConfig,
        field: HeightField,
        seed: u64,
        assets: &TextureRegistry,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let mut system = CollisionSystem::default();
        let level = Level::from_heights(field, &config, &mut system)?;
        let rng = SimRng::from_seed_u64(seed);
        Ok(Self::populate(config, level, system, rng, assets))
    }

    fn populate(
        config: SimConfig,
        level: Level,
        mut system: CollisionSystem,
        mut rng: SimRng,
        assets: &TextureRegistry,
    ) -> Self {
        let mut bodies = BodyArena::new();
        let props: Vec<Prop> = level
            .props()
            .iter()
            .map(|placement| Prop::spawn(placement, &mut bodies, &level, assets))
            .collect();
        let player = Player::spawn(&mut bodies, &mut system, &level, &config, assets);
        let npcs: Vec<Npc> = (0..config.npc.count)
            .map(|_| Npc::spawn(&mut bodies, &mut system, &level, &config, assets, &mut rng))
            .collect();
        info!(
            "session ready: {} props, {} npcs, {} bodies",
            props.len(),
            npcs.len(),
            bodies.len()
        );

        let mut camera = FollowCamera::new(config.camera.clone());
        camera.update(0.0, bodies.get(player.body_id()), &level);
        Self {
            config,
            level,
            system,
            bodies,
            input: InputState::default(),
            camera,
            player,
            npcs,
            props,
            rng,
            ticks: 0,
            elapsed_ms: 0.0,
        }
    }

    /// Advances the world by `raw_ms` milliseconds of wall time.
    ///
    /// The delta is clamped to `[0, max_frame_ms]`; a zero delta changes
    /// nothing.
    pub fn tick(&mut self, raw_ms: f32) -> TickReport {
        let max_ms = self.config.movement.max_frame_ms;
        let ms = frame_delta_ms(raw_ms, max_ms);
        let clamped = raw_ms > max_ms;
        if clamped {
            warn!("frame delta {raw_ms} ms clamped to {ms} ms");
        }
        if ms <= 0.0 {
            return TickReport {
                ms,
                clamped,
                ..TickReport::default()
            };
        }
        self.input.advance(ms);

        let view = view_context(&self.bodies, &self.player, &self.camera);
        let mut ctx = TickContext {
            bodies: &mut self.bodies,
            system: &self.system,
            level: &self.level,
            config: &self.config,
            input: &self.input,
            view,
            rng: &mut self.rng,
        };
        self.player.update(&mut ctx, ms);
        ctx.view = view_context(ctx.bodies, &self.player, &self.camera);
        for npc in &mut self.npcs {
            npc.update(&mut ctx, ms);
        }
        for prop in &mut self.props {
            prop.update(&mut ctx, ms);
        }
        self.settle_pushed_bodies();

        self.camera
            .update(ms, self.bodies.get(self.player.body_id()), &self.level);
        self.ticks += 1;
        self.elapsed_ms += f64::from(ms);
        TickReport {
            ms,
            clamped,
            player: *self.player.last_report(),
        }
    }

    /// Lifts bodies that a later body's separation pushed over higher
    /// ground after their own ground snap.
    fn settle_pushed_bodies(&mut self) {
        let layers = self.level.layers();
        for &id in self.system.dynamic_ids() {
            let Some(body) = self.bodies.get_mut(id) else {
                continue;
            };
            let pose = *body.pose();
            let floor_z = self.level.floor_z(pose.x, pose.y);
            if pose.z < floor_z {
                trace!("lifting pushed body {id:?} onto the floor");
                body.set_z(floor_z, layers);
            }
        }
    }

    /// Terrain of this session.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// The controlled character.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Body of the controlled character.
    #[must_use]
    pub fn player_body(&self) -> Option<&Body> {
        self.bodies.get(self.player.body_id())
    }

    /// Wandering characters in spawn order.
    #[must_use]
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Scenery.
    #[must_use]
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Every body.
    #[must_use]
    pub const fn bodies(&self) -> &BodyArena {
        &self.bodies
    }

    /// Chase camera.
    #[must_use]
    pub const fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Chase camera, e.g. to forward viewport resizes.
    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    /// The player's controls.
    #[must_use]
    pub const fn input(&self) -> &InputState {
        &self.input
    }

    /// The player's controls, for forwarding host input events.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Terrain colliders and registered bodies.
    #[must_use]
    pub const fn collisions(&self) -> &CollisionSystem {
        &self.system
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks that advanced time.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

fn view_context(bodies: &BodyArena, player: &Player, camera: &FollowCamera) -> ViewContext {
    ViewContext {
        reference_angle: bodies.get(player.body_id()).map(|body| body.pose().angle),
        camera_yaw: camera.yaw(),
        camera_position: Some(camera.position()),
        player_position: Some(player.mesh().position),
    }
}
