//! Directional billboard sprites and the movement loop that drives them.

pub mod billboard;
pub mod movement;
pub mod sheet;

pub use billboard::{
    player_direction, Billboard, BillboardOptions, SpriteMesh, Steering, ViewContext,
};
pub use movement::{step_movement, MovementContext, MovementReport, MovementState};
pub use sheet::{Animation, Direction, DirectionsToRows, SpriteSheet};
