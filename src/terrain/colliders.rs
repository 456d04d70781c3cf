//! Turns a height field into layered static colliders and instanced cell
//! transforms.

use glam::{Vec2, Vec3};

use crate::collision::{CollisionSystem, Shape};
use crate::config::EdgePolicy;
use crate::constants::CELL_MESH_OFFSET;
use crate::floors::FloorLayers;
use crate::numeric::{u32_to_f32, usize_to_f32};
use crate::terrain::heightfield::{cell_origin_signed, HeightField};

/// Placement of one instanced terrain column, in the terrain mesh's local
/// space (the mesh itself sits at `(-cols/2, 0, -rows/2)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransform {
    /// Instance slot: `row * rows + col`.
    pub index: usize,
    /// Column centre.
    pub position: Vec3,
    /// Column extent.
    pub scale: Vec3,
}

/// One transform per occupied cell.
#[must_use]
pub fn cell_transforms(field: &HeightField) -> Vec<CellTransform> {
    let mut transforms = Vec::with_capacity(field.occupied_cells());
    let rows = field.rows();
    field.for_each_height(|col, row, height| {
        let h = u32_to_f32(height);
        transforms.push(CellTransform {
            index: row * rows + col,
            position: Vec3::new(usize_to_f32(col), h / 4.0 - CELL_MESH_OFFSET, usize_to_f32(row)),
            scale: Vec3::new(1.0, h / 2.0, 1.0),
        });
    });
    transforms
}

/// Emits one unit box per occupied cell and layer, box `i` tagged with
/// layer `i`, and returns the number of colliders added.
///
/// Under [`EdgePolicy::Walled`] a ring of boxes just outside the grid blocks
/// every layer below the wall height.
pub fn synthesize_colliders(
    field: &HeightField,
    layers: &FloorLayers,
    system: &mut CollisionSystem,
) -> usize {
    let before = system.static_count();
    field.for_each_height(|col, row, height| {
        let (x, y) = field.cell_to_world(col, row);
        stack_boxes(system, layers, Vec2::new(x, y), height);
    });

    if let EdgePolicy::Walled { height } = field.edge() {
        let cols = i64::try_from(field.cols()).unwrap_or(i64::MAX);
        let rows = i64::try_from(field.rows()).unwrap_or(i64::MAX);
        for col in -1..=cols {
            for row in -1..=rows {
                let on_ring = col == -1 || row == -1 || col == cols || row == rows;
                if !on_ring {
                    continue;
                }
                let (x, y) = cell_origin_signed(col, row, field.cols(), field.rows());
                stack_boxes(system, layers, Vec2::new(x, y), height);
            }
        }
    }
    system.static_count() - before
}

fn stack_boxes(system: &mut CollisionSystem, layers: &FloorLayers, origin: Vec2, height: u32) {
    for group in (0..height).map_while(|layer| layers.get(layer)) {
        system.insert_static(origin, Shape::UNIT_BOX, group);
    }
}
