//! Simulation core for a small exploration game.
//!
//! Procedural layered terrain, per-layer 2D collision, billboard sprites
//! with directional sheets, a per-tick movement loop, wandering NPCs and a
//! chase camera. Rendering stays with the host; the crate exposes the data
//! a renderer needs.
pub mod assets;
pub mod body;
pub mod camera;
pub mod capability;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod floors;
pub mod input;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod physics;
pub mod plugin;
pub mod sim_rng;
pub mod sprite;
pub mod terrain;
pub mod vector_math;
pub mod world;

pub use assets::{TextureInfo, TextureRegistry};
pub use body::{Body, BodyArena, BodyId, BodyKind, Pose};
pub use camera::FollowCamera;
pub use capability::{Directional, Renderable, Steerable, TickContext};
pub use collision::CollisionSystem;
pub use config::{DeviceTier, EdgePolicy, SimConfig};
pub use entity::{Npc, NpcBrain, Player, Prop};
pub use error::{ConfigError, SessionError, TerrainError};
pub use level::Level;
pub use logging::init as init_logging;
pub use plugin::{advance_session_system, SimulationPlugin, SimulationSession};
pub use sim_rng::SimRng;
pub use vector_math::normalize_angle;
pub use world::{Session, TickReport};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use spritefield::prelude::*;
    //! ```

    pub use crate::capability::{Directional, Renderable, Steerable};
    pub use crate::config::{DeviceTier, SimConfig};
    pub use crate::input::InputState;
    pub use crate::sprite::{Direction, SpriteSheet};
    pub use crate::terrain::HeightField;
    pub use crate::world::Session;
    pub use crate::TextureRegistry;
}
