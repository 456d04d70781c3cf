//! Default tuning values shared across the simulation.
//!
//! Every value here seeds a field of [`crate::config::SimConfig`]; systems
//! read the configuration rather than these constants so sessions can be
//! tuned without recompiling.

/// Grid edge length on high-end devices.
pub const HIGH_END_GRID: usize = 48;
/// Grid edge length on low-end devices.
pub const LOW_END_GRID: usize = 24;
/// Initial occupancy of each terrain automaton layer.
pub const TERRAIN_FILL: f32 = 0.44;
/// Smoothing generations applied to each terrain layer.
pub const TERRAIN_ITERATIONS: u32 = 6;
/// Number of floor layers, and the tallest possible cell.
pub const MAX_LEVEL_HEIGHT: u32 = 10;
/// Layers discounted from every cell so low ground stays passable.
pub const MIN_LEVEL_HEIGHT: u32 = 2;
/// Vertical offset of the instanced cell boxes.
pub const CELL_MESH_OFFSET: f32 = 0.75;

/// Offset subtracted from `z` before deriving a floor-layer index.
pub const GROUP_OFFSET: f32 = 0.2;
/// Height difference treated as a climbable step during separation.
pub const STEP_TOLERANCE: f32 = 0.5;

/// Radius of a dynamic body's circle collider.
pub const BODY_RADIUS: f32 = 0.2;
/// Broad-phase padding around dynamic colliders.
pub const BODY_PADDING: f32 = 0.1;
/// Share of an overlap a dynamic body resolves against another dynamic body.
pub const SEPARATION_DYNAMIC: f32 = 0.33;
/// Share of an overlap a dynamic body resolves against a static obstacle.
pub const SEPARATION_STATIC: f32 = 1.0;

/// Forward speed in world units per second at full gear.
pub const MOVE_SPEED: f32 = 3.0;
/// Turn rate in radians per second.
pub const ROTATE_SPEED: f32 = 3.0;
/// Downward acceleration applied while airborne.
pub const GRAVITY: f32 = 9.1;
/// Launch velocity of a jump.
pub const JUMP_SPEED: f32 = 2.1;
/// Bodies below this height count as submerged.
pub const WATER_Z: f32 = 0.5;
/// Gear multiplier while submerged.
pub const SUBMERGED_FACTOR: f32 = 0.5;

/// Largest frame delta the simulation accepts, in milliseconds (20 fps).
pub const MAX_FRAME_MS: f32 = 50.0;
/// Default animation frame length in milliseconds.
pub const FRAME_DURATION_MS: f32 = 120.0;

/// Camera trailing distance behind its target.
pub const CAMERA_DISTANCE: f32 = 1.5;
/// Camera height above the tracked floor.
pub const CAMERA_HEIGHT: f32 = 0.75;
/// Camera smoothing ratio per elapsed millisecond.
pub const CAMERA_LERP_RATIO: f32 = 0.0033;

/// NPC population on high-end devices.
pub const HIGH_END_NPCS: usize = 64;
/// NPC population on low-end devices.
pub const LOW_END_NPCS: usize = 16;
/// Milliseconds between NPC steering decisions.
pub const NPC_ROTATION_INTERVAL_MS: f32 = 100.0;
/// Per-millisecond chance an NPC starts turning at a steering decision.
pub const NPC_ROTATE_CHANCE: f32 = 0.03;
/// Per-millisecond chance an NPC jumps.
pub const NPC_JUMP_CHANCE: f32 = 0.001;
/// Chance an NPC walks forward when its speed timer expires.
pub const NPC_WALK_CHANCE: f32 = 0.9;

/// Window in which a second pointer press counts as a double click.
pub const DOUBLE_CLICK_MS: f32 = 400.0;
/// How long a double click holds the jump key.
pub const JUMP_PULSE_MS: f32 = 200.0;
