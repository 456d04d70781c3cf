//! Explicit height grids for deterministic terrain.

use spritefield::collision::CollisionSystem;
use spritefield::config::{EdgePolicy, SimConfig};
use spritefield::level::Level;
use spritefield::terrain::HeightField;

/// Column-major height grid under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightGrid {
    columns: Vec<Vec<u32>>,
    edge: EdgePolicy,
}

impl HeightGrid {
    /// A `cols × rows` grid where every cell has `height`.
    ///
    /// # Examples
    /// ```
    /// use test_utils::HeightGrid;
    /// let field = HeightGrid::flat(4, 4, 2).field();
    /// assert_eq!(field.get_floor(0.0, 0.0), 2);
    /// ```
    pub fn flat(cols: usize, rows: usize, height: u32) -> Self {
        Self {
            columns: vec![vec![height; rows]; cols],
            edge: EdgePolicy::Open,
        }
    }

    /// Sets one cell.
    ///
    /// # Panics
    /// Panics when the cell lies outside the grid.
    #[must_use]
    pub fn cell(mut self, col: usize, row: usize, height: u32) -> Self {
        let column = self
            .columns
            .get_mut(col)
            .unwrap_or_else(|| panic!("column {col} outside grid"));
        let cell = column
            .get_mut(row)
            .unwrap_or_else(|| panic!("row {row} outside grid"));
        *cell = height;
        self
    }

    /// Uses `edge` for out-of-grid lookups.
    #[must_use]
    pub fn edge(mut self, edge: EdgePolicy) -> Self {
        self.edge = edge;
        self
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Default configuration resized to this grid.
    pub fn config(&self) -> SimConfig {
        let mut config = SimConfig::default();
        config.terrain.cols = self.cols();
        config.terrain.rows = self.rows();
        config.terrain.edge = self.edge;
        config
    }

    /// The finished height field.
    ///
    /// # Panics
    /// Panics when the grid is empty.
    pub fn field(&self) -> HeightField {
        HeightField::from_columns(self.columns.clone(), self.edge)
            .unwrap_or_else(|e| panic!("invalid test grid: {e}"))
    }

    /// A level over this grid with its colliders registered in `system`.
    ///
    /// # Panics
    /// Panics when the grid is empty.
    pub fn level(&self, system: &mut CollisionSystem) -> Level {
        Level::from_heights(self.field(), &self.config(), system)
            .unwrap_or_else(|e| panic!("invalid test level: {e}"))
    }
}
