//! Cellular automaton used to grow one terrain layer.
//!
//! Cells are seeded alive with a fixed probability and smoothed with a
//! majority birth/survival rule over the Moore neighbourhood. Neighbours outside the
//! grid count as dead, so edges erode.

use rand::Rng;

/// Fewest live neighbours that bring a dead cell to life.
const BORN_AT: usize = 5;
/// Fewest live neighbours that keep a live cell alive.
const SURVIVE_AT: usize = 4;

const fn next_state(alive: bool, neighbours: usize) -> bool {
    if alive {
        neighbours >= SURVIVE_AT
    } else {
        neighbours >= BORN_AT
    }
}

/// A `cols × rows` grid of live/dead cells stored column-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellularMap {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl CellularMap {
    /// Creates an all-dead map.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    /// Seeds a map and smooths it for `iterations` generations.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use spritefield::terrain::CellularMap;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let map = CellularMap::generate(16, 16, 0.5, 4, &mut rng);
    /// assert_eq!(map.cols(), 16);
    /// ```
    #[must_use]
    pub fn generate<R: Rng>(
        cols: usize,
        rows: usize,
        fill: f32,
        iterations: u32,
        rng: &mut R,
    ) -> Self {
        let mut map = Self::new(cols, rows);
        map.randomize(fill, rng);
        for _ in 0..iterations {
            map.step();
        }
        map
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

    /// Marks each cell alive with probability `fill`.
    pub fn randomize<R: Rng>(&mut self, fill: f32, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen::<f32>() < fill;
        }
    }

    /// Whether the cell is alive; out-of-grid cells are dead.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> bool {
        if col >= self.cols || row >= self.rows {
            return false;
        }
        self.cells.get(col * self.rows + row).copied().unwrap_or(false)
    }

    /// Sets a cell; out-of-grid writes are ignored.
    pub fn set(&mut self, col: usize, row: usize, alive: bool) {
        if col >= self.cols || row >= self.rows {
            return;
        }
        if let Some(cell) = self.cells.get_mut(col * self.rows + row) {
            *cell = alive;
        }
    }

    /// Live cell count.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    /// Advances one generation.
    pub fn step(&mut self) {
        let mut next = vec![false; self.cells.len()];
        for col in 0..self.cols {
            for row in 0..self.rows {
                let alive = self.get(col, row);
                let neighbours = self.live_neighbours(col, row);
                if let Some(slot) = next.get_mut(col * self.rows + row) {
                    *slot = next_state(alive, neighbours);
                }
            }
        }
        self.cells = next;
    }

    fn live_neighbours(&self, col: usize, row: usize) -> usize {
        let mut count = 0;
        for dc in [-1_isize, 0, 1] {
            for dr in [-1_isize, 0, 1] {
                if dc == 0 && dr == 0 {
                    continue;
                }
                let (Some(c), Some(r)) = (col.checked_add_signed(dc), row.checked_add_signed(dr))
                else {
                    continue;
                };
                if self.get(c, r) {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn isolated_cell_dies() {
        let mut map = CellularMap::new(3, 3);
        map.set(1, 1, true);
        map.step();
        assert_eq!(map.alive_count(), 0);
    }

    #[test]
    fn dense_block_interior_survives() {
        let mut map = CellularMap::new(5, 5);
        for col in 0..5 {
            for row in 0..3 {
                map.set(col, row, true);
            }
        }
        map.step();
        // Interior cells of the block keep at least four neighbours.
        assert!(map.get(2, 1));
        // (2, 3) had exactly three live neighbours: not enough to be born.
        assert!(!map.get(2, 3));
    }

    #[test]
    fn birth_needs_five_and_survival_four() {
        assert!(!next_state(false, 4));
        assert!(next_state(false, 5));
        assert!(!next_state(true, 3));
        assert!(next_state(true, 4));
        assert!(next_state(true, 8));
    }

    #[test]
    fn fill_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let full = CellularMap::generate(8, 8, 1.0, 0, &mut rng);
        assert_eq!(full.alive_count(), 64);
        let empty = CellularMap::generate(8, 8, 0.0, 3, &mut rng);
        assert_eq!(empty.alive_count(), 0);
    }

    #[test]
    fn out_of_grid_reads_are_dead() {
        let map = CellularMap::generate(4, 4, 1.0, 0, &mut ChaCha8Rng::seed_from_u64(3));
        assert!(!map.get(4, 0));
        assert!(!map.get(0, 4));
    }
}
