//! A playable level: terrain, floor layers, colliders and scenery.
//!
//! The level is the only component that answers "how high is the ground
//! here?", and every body and camera goes through [`Level::get_floor`].

use glam::Vec3;
use log::info;
use rand::Rng;

use crate::assets::TextureRegistry;
use crate::collision::CollisionSystem;
use crate::config::SimConfig;
use crate::error::TerrainError;
use crate::floors::{FloorGroup, FloorLayers};
use crate::numeric::usize_to_f32;
use crate::terrain::{
    cell_transforms, scatter_props, synthesize_colliders, CellTransform, HeightField,
    PropPlacement,
};

/// Immutable terrain plus everything derived from it.
#[derive(Debug, Clone)]
pub struct Level {
    field: HeightField,
    layers: FloorLayers,
    cells: Vec<CellTransform>,
    props: Vec<PropPlacement>,
    collider_count: usize,
}

impl Level {
    /// Generates terrain and scenery and registers the terrain colliders in
    /// `system`.
    pub fn generate<R: Rng>(
        config: &SimConfig,
        assets: &TextureRegistry,
        rng: &mut R,
        system: &mut CollisionSystem,
    ) -> Self {
        let field = HeightField::generate(&config.terrain, rng);
        let props = if config.terrain.scatter_props {
            scatter_props(&field, assets, rng)
        } else {
            Vec::new()
        };
        Self::assemble(field, config, props, system)
    }

    /// Builds a level around an explicit height field. No scenery is
    /// scattered.
    ///
    /// # Errors
    /// Returns [`TerrainError::Mismatch`] when the field's dimensions differ
    /// from `config.terrain`.
    pub fn from_heights(
        field: HeightField,
        config: &SimConfig,
        system: &mut CollisionSystem,
    ) -> Result<Self, TerrainError> {
        if field.cols() != config.terrain.cols || field.rows() != config.terrain.rows {
            return Err(TerrainError::Mismatch {
                cols: field.cols(),
                rows: field.rows(),
                expected_cols: config.terrain.cols,
                expected_rows: config.terrain.rows,
            });
        }
        Ok(Self::assemble(field, config, Vec::new(), system))
    }

    fn assemble(
        field: HeightField,
        config: &SimConfig,
        props: Vec<PropPlacement>,
        system: &mut CollisionSystem,
    ) -> Self {
        // Walls and explicit cells may rise above the configured height.
        let tallest = config
            .terrain
            .max_level_height
            .max(field.max_height())
            .max(field.edge_height());
        let layers = FloorLayers::new(tallest, config.body.group_offset);
        let collider_count = synthesize_colliders(&field, &layers, system);
        let cells = cell_transforms(&field);
        info!(
            "level {}x{}: {} occupied cells, {} colliders, {} props",
            field.cols(),
            field.rows(),
            field.occupied_cells(),
            collider_count,
            props.len()
        );
        Self {
            field,
            layers,
            cells,
            props,
            collider_count,
        }
    }

    /// Floor height in half units under `(x, y)`.
    #[must_use]
    pub fn get_floor(&self, x: f32, y: f32) -> u32 {
        self.field.get_floor(x, y)
    }

    /// World-space floor height under `(x, y)`.
    #[must_use]
    pub fn floor_z(&self, x: f32, y: f32) -> f32 {
        self.field.floor_z(x, y)
    }

    /// Floor group a body at height `z` belongs to.
    #[must_use]
    pub fn group_for_z(&self, z: f32) -> FloorGroup {
        self.layers.group_for_z(z)
    }

    /// Underlying height field.
    #[must_use]
    pub const fn field(&self) -> &HeightField {
        &self.field
    }

    /// Floor layers colliders are tagged with.
    #[must_use]
    pub const fn layers(&self) -> &FloorLayers {
        &self.layers
    }

    /// Instanced terrain column transforms.
    #[must_use]
    pub fn cell_transforms(&self) -> &[CellTransform] {
        &self.cells
    }

    /// Scenery positions.
    #[must_use]
    pub fn props(&self) -> &[PropPlacement] {
        &self.props
    }

    /// Number of terrain colliders registered.
    #[must_use]
    pub const fn collider_count(&self) -> usize {
        self.collider_count
    }

    /// Grid columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.field.cols()
    }

    /// Grid rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.field.rows()
    }

    /// Where the instanced terrain mesh is anchored.
    #[must_use]
    pub fn mesh_origin(&self) -> Vec3 {
        Vec3::new(
            -usize_to_f32(self.cols()) / 2.0,
            0.0,
            -usize_to_f32(self.rows()) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureInfo;
    use crate::collision::Shape;
    use glam::Vec2;
    use crate::config::{DeviceTier, EdgePolicy};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn explicit_heights_drive_floor_and_colliders() {
        let mut config = SimConfig::for_tier(DeviceTier::LowEnd);
        config.terrain.cols = 2;
        config.terrain.rows = 2;
        let field = HeightField::from_columns(vec![vec![0, 1], vec![2, 0]], EdgePolicy::Open)
            .expect("grid");
        let mut system = CollisionSystem::default();
        let level = Level::from_heights(field, &config, &mut system).expect("level");
        assert_eq!(level.get_floor(0.5, -0.5), 2);
        assert!((level.floor_z(-0.5, 0.5) - 0.5).abs() < f32::EPSILON);
        assert_eq!(level.collider_count(), 3);
        assert_eq!(system.static_count(), 3);
        assert_eq!(level.cell_transforms().len(), 2);
        assert_eq!(level.mesh_origin(), Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn walls_above_the_configured_height_block_every_layer() {
        let mut config = SimConfig::for_tier(DeviceTier::LowEnd);
        config.terrain.cols = 2;
        config.terrain.rows = 2;
        config.terrain.max_level_height = 2;
        let field = HeightField::from_columns(vec![vec![0; 2]; 2], EdgePolicy::Walled { height: 6 })
            .expect("grid");
        let mut system = CollisionSystem::default();
        let level = Level::from_heights(field, &config, &mut system).expect("level");
        assert_eq!(level.layers().len(), 6);

        // A body standing in the top layer still meets the ring.
        let top = level.layers().get(5).expect("top layer");
        let beside_ring = Shape::Circle { radius: 0.2 }.aabb(Vec2::new(1.1, 0.0), 0.0);
        assert!(!system.statics_near(&beside_ring, top).is_empty());
    }

    #[test]
    fn mismatched_grid_is_rejected() {
        let config = SimConfig::for_tier(DeviceTier::LowEnd);
        let field = HeightField::from_columns(vec![vec![0; 3]; 3], EdgePolicy::Open).expect("grid");
        let err = Level::from_heights(field, &config, &mut CollisionSystem::default())
            .expect_err("dimensions differ");
        assert!(matches!(err, TerrainError::Mismatch { cols: 3, .. }));
    }

    #[test]
    fn generated_level_has_props_when_textures_exist() {
        let config = SimConfig::for_tier(DeviceTier::LowEnd);
        let info = TextureInfo {
            width: 16,
            height: 16,
        };
        let assets = TextureRegistry::new().with("tree", info).with("bush", info);
        let mut system = CollisionSystem::default();
        let level = Level::generate(&config, &assets, &mut ChaCha8Rng::seed_from_u64(8), &mut system);
        assert_eq!(level.cols(), 24);
        assert_eq!(level.layers().len(), 10);
        assert_eq!(system.static_count(), level.collider_count());
        assert!(!level.props().is_empty());
    }
}
