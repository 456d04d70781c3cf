//! Capabilities entity kinds are composed from.
//!
//! A player, an NPC and a tree share no base type. Each implements the
//! capabilities it has, and the session drives them through these traits
//! with an explicit [`TickContext`].

use crate::body::{BodyArena, BodyId};
use crate::collision::CollisionSystem;
use crate::config::SimConfig;
use crate::input::InputState;
use crate::level::Level;
use crate::sim_rng::SimRng;
use crate::sprite::{
    Animation, Billboard, Direction, MovementContext, MovementState, SpriteMesh, SpriteSheet,
    ViewContext,
};

/// Everything an entity may read or mutate while it updates.
#[derive(Debug)]
pub struct TickContext<'a> {
    /// Every body in the session.
    pub bodies: &'a mut BodyArena,
    /// Colliders and registered bodies.
    pub system: &'a CollisionSystem,
    /// Terrain.
    pub level: &'a Level,
    /// Tuning.
    pub config: &'a SimConfig,
    /// The player's controls.
    pub input: &'a InputState,
    /// Viewer state for facing and orientation.
    pub view: ViewContext,
    /// Session randomness.
    pub rng: &'a mut SimRng,
}

impl<'a> TickContext<'a> {
    /// Read-only collaborators of the movement loop.
    #[must_use]
    pub const fn movement(&self) -> MovementContext<'a> {
        MovementContext {
            level: self.level,
            system: self.system,
            config: self.config,
        }
    }
}

/// Something drawn every frame.
pub trait Renderable {
    /// Current render state.
    fn mesh(&self) -> &SpriteMesh;

    /// Advances the entity by `ms` milliseconds.
    fn update(&mut self, ctx: &mut TickContext<'_>, ms: f32);
}

/// Something with a facing and an animated sheet.
pub trait Directional {
    /// Sprite of the entity.
    fn billboard(&self) -> &Billboard;

    /// Current facing.
    fn direction(&self) -> Direction {
        self.billboard().direction()
    }

    /// Animation cursor.
    fn animation(&self) -> &Animation {
        self.billboard().animation()
    }

    /// Atlas layout.
    fn sheet(&self) -> &SpriteSheet {
        self.billboard().sheet()
    }
}

/// Something that moves under the movement loop.
pub trait Steerable {
    /// Body being steered.
    fn body_id(&self) -> BodyId;

    /// Velocity and queued hop.
    fn movement(&self) -> &MovementState;

    /// Vertical velocity.
    fn velocity(&self) -> f32 {
        self.movement().velocity
    }
}
