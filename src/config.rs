//! Session configuration.
//!
//! All tunables that used to drift between game variants live here with a
//! single canonical default. Configurations deserialize from JSON so a host
//! can ship tuned values without rebuilding.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BODY_PADDING, BODY_RADIUS, CAMERA_DISTANCE, CAMERA_HEIGHT, CAMERA_LERP_RATIO,
    FRAME_DURATION_MS, GRAVITY, GROUP_OFFSET, HIGH_END_GRID, HIGH_END_NPCS, JUMP_SPEED,
    LOW_END_GRID, LOW_END_NPCS, MAX_FRAME_MS, MAX_LEVEL_HEIGHT, MIN_LEVEL_HEIGHT, MOVE_SPEED,
    NPC_JUMP_CHANCE, NPC_ROTATE_CHANCE, NPC_ROTATION_INTERVAL_MS, NPC_WALK_CHANCE, ROTATE_SPEED,
    SEPARATION_DYNAMIC, SEPARATION_STATIC, STEP_TOLERANCE, SUBMERGED_FACTOR, TERRAIN_FILL,
    TERRAIN_ITERATIONS, WATER_Z,
};
use crate::error::ConfigError;

/// Hardware class the session is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceTier {
    /// Desktop-class hardware.
    #[default]
    HighEnd,
    /// Mobile or TV hardware.
    LowEnd,
}

impl DeviceTier {
    /// Edge length of the square terrain grid.
    #[must_use]
    pub const fn grid_size(self) -> usize {
        match self {
            Self::HighEnd => HIGH_END_GRID,
            Self::LowEnd => LOW_END_GRID,
        }
    }

    /// Default NPC population.
    #[must_use]
    pub const fn npc_count(self) -> usize {
        match self {
            Self::HighEnd => HIGH_END_NPCS,
            Self::LowEnd => LOW_END_NPCS,
        }
    }

    /// Camera far plane distance.
    #[must_use]
    pub const fn camera_far(self) -> f32 {
        match self {
            Self::HighEnd => 32.0,
            Self::LowEnd => 24.0,
        }
    }
}

/// What the floor lookup reports outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EdgePolicy {
    /// Out-of-grid ground is open at height zero.
    #[default]
    Open,
    /// Out-of-grid ground is a wall of the given height in half units.
    Walled {
        /// Wall height reported by the floor lookup.
        height: u32,
    },
}

/// Parameters of the procedural height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid columns.
    pub cols: usize,
    /// Grid rows.
    pub rows: usize,
    /// Initial occupancy of each automaton layer.
    pub fill: f32,
    /// Smoothing generations per layer.
    pub iterations: u32,
    /// Number of floor layers and tallest cell.
    pub max_level_height: u32,
    /// Layers discounted as passable base.
    pub min_level_height: u32,
    /// Out-of-grid floor policy.
    pub edge: EdgePolicy,
    /// Whether trees and bushes are scattered.
    pub scatter_props: bool,
}

impl TerrainConfig {
    /// Terrain tuned for a device tier.
    #[must_use]
    pub fn for_tier(tier: DeviceTier) -> Self {
        Self {
            cols: tier.grid_size(),
            rows: tier.grid_size(),
            ..Self::default()
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            cols: HIGH_END_GRID,
            rows: HIGH_END_GRID,
            fill: TERRAIN_FILL,
            iterations: TERRAIN_ITERATIONS,
            max_level_height: MAX_LEVEL_HEIGHT,
            min_level_height: MIN_LEVEL_HEIGHT,
            edge: EdgePolicy::Open,
            scatter_props: true,
        }
    }
}

/// Collider and separation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Dynamic collider radius.
    pub radius: f32,
    /// Broad-phase padding.
    pub padding: f32,
    /// Overlap share resolved against dynamic bodies.
    pub separation_dynamic: f32,
    /// Overlap share resolved against static obstacles.
    pub separation_static: f32,
    /// Height difference that still counts as a step.
    pub step_tolerance: f32,
    /// Offset subtracted from `z` when deriving the floor layer.
    pub group_offset: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            radius: BODY_RADIUS,
            padding: BODY_PADDING,
            separation_dynamic: SEPARATION_DYNAMIC,
            separation_static: SEPARATION_STATIC,
            step_tolerance: STEP_TOLERANCE,
            group_offset: GROUP_OFFSET,
        }
    }
}

/// Per-tick movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Forward speed at full gear, units per second.
    pub move_speed: f32,
    /// Turn rate, radians per second.
    pub rotate_speed: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// Jump launch velocity.
    pub jump_speed: f32,
    /// Height under which a body counts as submerged.
    pub water_z: f32,
    /// Gear multiplier while submerged.
    pub submerged_factor: f32,
    /// Largest accepted frame delta in milliseconds.
    pub max_frame_ms: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            rotate_speed: ROTATE_SPEED,
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            water_z: WATER_Z,
            submerged_factor: SUBMERGED_FACTOR,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

/// Chase camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Trailing distance at aspect ratio 1.
    pub distance: f32,
    /// Height above the tracked floor.
    pub height: f32,
    /// Smoothing ratio per millisecond.
    pub lerp_ratio: f32,
    /// Far plane distance.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            height: CAMERA_HEIGHT,
            lerp_ratio: CAMERA_LERP_RATIO,
            far: DeviceTier::HighEnd.camera_far(),
        }
    }
}

/// Wandering NPC tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Number of NPCs spawned with the session.
    pub count: usize,
    /// Milliseconds between steering decisions.
    pub rotation_interval_ms: f32,
    /// Per-millisecond chance to start turning.
    pub rotate_chance: f32,
    /// Per-millisecond chance to jump.
    pub jump_chance: f32,
    /// Chance to keep walking forward.
    pub walk_chance: f32,
    /// Animation frame length for NPC sheets.
    pub frame_duration_ms: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            count: HIGH_END_NPCS,
            rotation_interval_ms: NPC_ROTATION_INTERVAL_MS,
            rotate_chance: NPC_ROTATE_CHANCE,
            jump_chance: NPC_JUMP_CHANCE,
            walk_chance: NPC_WALK_CHANCE,
            frame_duration_ms: FRAME_DURATION_MS,
        }
    }
}

/// Complete configuration of a simulation session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Hardware class the defaults were derived from.
    pub tier: DeviceTier,
    /// Height field generation.
    pub terrain: TerrainConfig,
    /// Colliders and separation.
    pub body: BodyConfig,
    /// Movement loop.
    pub movement: MovementConfig,
    /// Chase camera.
    pub camera: CameraConfig,
    /// NPC population and behaviour.
    pub npc: NpcConfig,
}

impl SimConfig {
    /// Defaults tuned for a device tier.
    ///
    /// # Examples
    /// ```
    /// use spritefield::config::{DeviceTier, SimConfig};
    /// let config = SimConfig::for_tier(DeviceTier::LowEnd);
    /// assert_eq!(config.terrain.cols, 24);
    /// assert_eq!(config.npc.count, 16);
    /// ```
    #[must_use]
    pub fn for_tier(tier: DeviceTier) -> Self {
        Self {
            tier,
            terrain: TerrainConfig::for_tier(tier),
            camera: CameraConfig {
                far: tier.camera_far(),
                ..CameraConfig::default()
            },
            npc: NpcConfig {
                count: tier.npc_count(),
                ..NpcConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`SimConfig::validate`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`SimConfig::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that every value lies within its usable domain.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if terrain.cols == 0 || terrain.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                cols: terrain.cols,
                rows: terrain.rows,
            });
        }
        if terrain.max_level_height == 0 {
            return Err(ConfigError::NoFloorLayers);
        }
        check_ratio("terrain.fill", terrain.fill)?;
        check_ratio("npc.walk_chance", self.npc.walk_chance)?;
        check_positive("body.radius", self.body.radius)?;
        check_positive("movement.move_speed", self.movement.move_speed)?;
        check_positive("movement.rotate_speed", self.movement.rotate_speed)?;
        check_positive("movement.max_frame_ms", self.movement.max_frame_ms)?;
        check_positive("movement.jump_speed", self.movement.jump_speed)?;
        check_positive("movement.gravity", self.movement.gravity)?;
        check_positive("npc.frame_duration_ms", self.npc.frame_duration_ms)?;
        check_positive("camera.distance", self.camera.distance)?;
        Ok(())
    }
}

fn check_ratio(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRatio { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::for_tier(DeviceTier::LowEnd).validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json_str(
            r#"{ "terrain": { "cols": 12, "edge": { "kind": "walled", "height": 20 } } }"#,
        )
        .expect("config should parse");
        assert_eq!(config.terrain.cols, 12);
        assert_eq!(config.terrain.rows, HIGH_END_GRID);
        assert_eq!(config.terrain.edge, EdgePolicy::Walled { height: 20 });
        assert_eq!(config.movement, MovementConfig::default());
    }

    #[rstest]
    #[case::empty_grid(r#"{ "terrain": { "cols": 0 } }"#)]
    #[case::fill_too_high(r#"{ "terrain": { "fill": 1.5 } }"#)]
    #[case::no_layers(r#"{ "terrain": { "max_level_height": 0 } }"#)]
    #[case::zero_radius(r#"{ "body": { "radius": 0.0 } }"#)]
    #[case::negative_frame(r#"{ "npc": { "frame_duration_ms": -1.0 } }"#)]
    #[case::not_json("terrain = 3")]
    fn invalid_configs_are_rejected(#[case] text: &str) {
        assert!(SimConfig::from_json_str(text).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimConfig::from_path(Path::new("/definitely/not/here.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
