//! Procedural terrain: automaton layers, the height field built from them,
//! the colliders derived from it and the scenery scattered over it.

pub mod cellular;
pub mod colliders;
pub mod heightfield;
pub mod props;

pub use cellular::CellularMap;
pub use colliders::{cell_transforms, synthesize_colliders, CellTransform};
pub use heightfield::{generate_heights, HeightField, LayerRange};
pub use props::{scatter_props, PropKind, PropPlacement};
