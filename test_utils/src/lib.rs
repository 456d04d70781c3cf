//! Builders shared by the integration tests: explicit terrain, seeded
//! sessions, input snapshots and a headless app wrapper.

pub mod headless;
pub mod input;
pub mod levels;
pub mod sessions;

pub use input::{holding, idle};
pub use levels::HeightGrid;
pub use sessions::{character_textures, flat_session, seeded_session};
