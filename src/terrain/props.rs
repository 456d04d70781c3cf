//! Scenery scattering: trees on raised ground, bushes on any ground.
//!
//! Each kind draws its own cellular mask so props cluster into groves
//! instead of spreading uniformly.

use log::debug;
use rand::Rng;

use crate::assets::TextureRegistry;
use crate::numeric::usize_to_f32;
use crate::terrain::cellular::CellularMap;
use crate::terrain::heightfield::HeightField;

const TREE_FILL: f32 = 0.5;
const TREE_ITERATIONS: u32 = 2;
const TREE_CHANCE: f32 = 0.25;
const TREE_MIN_HEIGHT: u32 = 2;
const BUSH_FILL: f32 = 0.35;
const BUSH_ITERATIONS: u32 = 1;
const BUSH_CHANCE: f32 = 0.6;
const BUSH_MIN_HEIGHT: u32 = 1;

/// Kind of static scenery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// Tall tree billboard.
    Tree,
    /// Low bush billboard.
    Bush,
}

impl PropKind {
    /// Texture the prop is drawn with.
    #[must_use]
    pub const fn texture_name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Bush => "bush",
        }
    }

    /// Billboard scale.
    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Tree => 1.5,
            Self::Bush => 1.0,
        }
    }
}

/// A prop and where it stands on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropPlacement {
    /// What to place.
    pub kind: PropKind,
    /// World x.
    pub x: f32,
    /// World y.
    pub y: f32,
}

/// Picks prop positions over `field`.
///
/// Both masks are always drawn so the random stream does not depend on
/// which textures happen to be loaded; only placement is skipped.
pub fn scatter_props<R: Rng>(
    field: &HeightField,
    assets: &TextureRegistry,
    rng: &mut R,
) -> Vec<PropPlacement> {
    let (cols, rows) = (field.cols(), field.rows());
    let trees = CellularMap::generate(cols, rows, TREE_FILL, TREE_ITERATIONS, rng);
    let bushes = CellularMap::generate(cols * 2, rows * 2, BUSH_FILL, BUSH_ITERATIONS, rng);
    let mut placements = Vec::new();

    if assets.contains(PropKind::Tree.texture_name()) {
        field.for_each_height(|col, row, height| {
            if trees.get(col, row) && height >= TREE_MIN_HEIGHT && rng.gen::<f32>() < TREE_CHANCE {
                let (x, y) = field.cell_to_world(col, row);
                placements.push(PropPlacement {
                    kind: PropKind::Tree,
                    x: x + 0.5,
                    y: y + 0.5,
                });
            }
        });
    } else {
        debug!("tree texture missing; skipping trees");
    }

    if assets.contains(PropKind::Bush.texture_name()) {
        let half_cols = usize_to_f32(cols) / 2.0;
        let half_rows = usize_to_f32(rows) / 2.0;
        for col in 0..bushes.cols() {
            for row in 0..bushes.rows() {
                if !bushes.get(col, row) {
                    continue;
                }
                let height = field.height_at(col / 2, row / 2).unwrap_or(0);
                if height >= BUSH_MIN_HEIGHT && rng.gen::<f32>() < BUSH_CHANCE {
                    placements.push(PropPlacement {
                        kind: PropKind::Bush,
                        x: usize_to_f32(col) / 2.0 - half_cols + 0.25,
                        y: usize_to_f32(row) / 2.0 - half_rows + 0.25,
                    });
                }
            }
        }
    } else {
        debug!("bush texture missing; skipping bushes");
    }

    debug!("scattered {} props", placements.len());
    placements
}
