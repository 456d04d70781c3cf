//! Discrete terrain height map and the floor lookup every body relies on.
//!
//! Heights are counted in half-unit steps: a cell of height `h` has its top
//! face at `z = h / 2`. The grid is centred on the world origin, so column
//! `c` covers world `x ∈ [c - cols/2, c - cols/2 + 1)`.

use log::debug;
use rand::Rng;

use crate::config::{EdgePolicy, TerrainConfig};
use crate::error::TerrainError;
use crate::numeric::{floor_to_index, u32_to_f32, usize_to_f32};
use crate::terrain::cellular::CellularMap;

/// Number of stacked automaton layers and the passable base they discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRange {
    /// Tallest possible cell.
    pub max: u32,
    /// Layers subtracted from every cell before clamping at zero.
    pub min: u32,
}

/// Sums `max + min` automaton layers on a baseline of `-min` and clamps at
/// zero, so each cell lands in `[0, max]`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use spritefield::terrain::{generate_heights, LayerRange};
///
/// let layers = LayerRange { max: 10, min: 2 };
/// let a = generate_heights(24, 24, 0.5, 4, layers, &mut ChaCha8Rng::seed_from_u64(9));
/// let b = generate_heights(24, 24, 0.5, 4, layers, &mut ChaCha8Rng::seed_from_u64(9));
/// assert_eq!(a, b);
/// assert!(a.iter().flatten().all(|h| *h <= 10));
/// ```
#[must_use]
pub fn generate_heights<R: Rng>(
    cols: usize,
    rows: usize,
    fill: f32,
    iterations: u32,
    layers: LayerRange,
    rng: &mut R,
) -> Vec<Vec<u32>> {
    let mut totals = vec![vec![0_u32; rows]; cols];
    for _ in 0..layers.max + layers.min {
        let layer = CellularMap::generate(cols, rows, fill, iterations, rng);
        for (col, column) in totals.iter_mut().enumerate() {
            for (row, total) in column.iter_mut().enumerate() {
                *total += u32::from(layer.get(col, row));
            }
        }
    }
    for total in totals.iter_mut().flatten() {
        *total = total.saturating_sub(layers.min);
    }
    totals
}

/// Immutable terrain height grid with an O(1) floor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightField {
    cols: usize,
    rows: usize,
    heights: Vec<u32>,
    edge: EdgePolicy,
}

impl HeightField {
    /// Generates a height field from the terrain configuration.
    #[must_use]
    pub fn generate<R: Rng>(config: &TerrainConfig, rng: &mut R) -> Self {
        let layers = LayerRange {
            max: config.max_level_height,
            min: config.min_level_height,
        };
        let columns = generate_heights(
            config.cols,
            config.rows,
            config.fill,
            config.iterations,
            layers,
            rng,
        );
        let field = Self::from_rectangular(config.cols, config.rows, &columns, config.edge);
        debug!(
            "generated {}x{} height field with {} occupied cells",
            field.cols,
            field.rows,
            field.occupied_cells()
        );
        field
    }

    /// Builds a height field from explicit `heights[col][row]` columns.
    ///
    /// # Errors
    /// Returns [`TerrainError::Empty`] for an empty grid and
    /// [`TerrainError::Ragged`] when columns differ in length.
    ///
    /// # Examples
    /// ```
    /// use spritefield::config::EdgePolicy;
    /// use spritefield::terrain::HeightField;
    ///
    /// let field = HeightField::from_columns(vec![vec![0, 1], vec![2, 3]], EdgePolicy::Open)?;
    /// assert_eq!(field.get_floor(0.5, -0.5), 2);
    /// assert_eq!(field.get_floor(40.0, 0.0), 0);
    /// # Ok::<(), spritefield::error::TerrainError>(())
    /// ```
    pub fn from_columns(columns: Vec<Vec<u32>>, edge: EdgePolicy) -> Result<Self, TerrainError> {
        let rows = columns.first().map_or(0, Vec::len);
        if columns.is_empty() || rows == 0 {
            return Err(TerrainError::Empty);
        }
        if let Some((column, found)) = columns
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != rows)
        {
            return Err(TerrainError::Ragged {
                column,
                expected: rows,
                found,
            });
        }
        Ok(Self::from_rectangular(columns.len(), rows, &columns, edge))
    }

    fn from_rectangular(cols: usize, rows: usize, columns: &[Vec<u32>], edge: EdgePolicy) -> Self {
        let heights = columns.iter().flatten().copied().collect();
        Self {
            cols,
            rows,
            heights,
            edge,
        }
    }

    /// Column count.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Row count.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Out-of-grid policy in force.
    #[must_use]
    pub const fn edge(&self) -> EdgePolicy {
        self.edge
    }

    /// Height of a grid cell, or `None` outside the grid.
    #[must_use]
    pub fn height_at(&self, col: usize, row: usize) -> Option<u32> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.heights.get(col * self.rows + row).copied()
    }

    /// Floor height in half units beneath world `(x, y)`.
    ///
    /// Total over all inputs: coordinates outside the grid, including
    /// non-finite ones, resolve through the edge policy.
    #[must_use]
    pub fn get_floor(&self, x: f32, y: f32) -> u32 {
        let col_index = floor_to_index(x + usize_to_f32(self.cols) / 2.0, self.cols);
        let row_index = floor_to_index(y + usize_to_f32(self.rows) / 2.0, self.rows);
        col_index
            .zip(row_index)
            .and_then(|(col, row)| self.height_at(col, row))
            .unwrap_or_else(|| self.edge_height())
    }

    /// World-space height of the floor beneath `(x, y)`.
    #[must_use]
    pub fn floor_z(&self, x: f32, y: f32) -> f32 {
        u32_to_f32(self.get_floor(x, y)) / 2.0
    }

    /// Height reported outside the grid.
    #[must_use]
    pub const fn edge_height(&self) -> u32 {
        match self.edge {
            EdgePolicy::Open => 0,
            EdgePolicy::Walled { height } => height,
        }
    }

    /// World coordinates of a cell's minimum corner.
    #[must_use]
    pub fn cell_to_world(&self, col: usize, row: usize) -> (f32, f32) {
        cell_origin(col, row, self.cols, self.rows)
    }

    /// Calls `visit(col, row, height)` for every cell with non-zero height.
    pub fn for_each_height<F: FnMut(usize, usize, u32)>(&self, mut visit: F) {
        for col in 0..self.cols {
            for row in 0..self.rows {
                if let Some(height) = self.height_at(col, row).filter(|h| *h > 0) {
                    visit(col, row, height);
                }
            }
        }
    }

    /// Number of cells with non-zero height.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.heights.iter().filter(|h| **h > 0).count()
    }

    /// Tallest cell in the grid.
    #[must_use]
    pub fn max_height(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Every height in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.heights.iter().copied()
    }
}

/// World coordinates of the minimum corner of cell `(col, row)` in a
/// `cols × rows` grid centred on the origin. Accepts signed cells so edge
/// rings just outside the grid can be placed too.
#[must_use]
pub fn cell_origin_signed(col: i64, row: i64, cols: usize, rows: usize) -> (f32, f32) {
    #[expect(
        clippy::cast_precision_loss,
        reason = "Cell indices are tiny compared to f32 precision."
    )]
    let (x, y) = (col as f32, row as f32);
    (x - usize_to_f32(cols) / 2.0, y - usize_to_f32(rows) / 2.0)
}

fn cell_origin(col: usize, row: usize, cols: usize, rows: usize) -> (f32, f32) {
    (
        usize_to_f32(col) - usize_to_f32(cols) / 2.0,
        usize_to_f32(row) - usize_to_f32(rows) / 2.0,
    )
}
