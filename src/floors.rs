//! Floor-layer collision groups.
//!
//! A 2D collision engine cannot tell a ledge from a wall. Each discrete
//! vertical band of terrain therefore gets its own group tag, and a body only
//! interacts with colliders that share its current band. Walking under an
//! overhang or over a low step then falls out of ordinary 2D checks.

use crate::numeric::round_half_up_to_u32;

/// Opaque collision group for one floor layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FloorGroup(u32);

impl FloorGroup {
    /// Group of layer `index`.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Layer index this group stands for.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Whether colliders in `self` and `other` can touch.
    #[must_use]
    pub const fn interacts(self, other: Self) -> bool {
        self.0 == other.0
    }
}

/// Ordered set of the groups terrain colliders are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLayers {
    groups: Vec<FloorGroup>,
    offset: f32,
}

impl FloorLayers {
    /// One group per layer in `0..max_level_height`; `offset` is subtracted
    /// from `z` before a body's layer is derived.
    #[must_use]
    pub fn new(max_level_height: u32, offset: f32) -> Self {
        Self {
            groups: (0..max_level_height).map(FloorGroup::new).collect(),
            offset,
        }
    }

    /// Group of terrain layer `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<FloorGroup> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.groups.get(i))
            .copied()
    }

    /// Number of terrain layers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the level has no layers at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Layer index a body at height `z` belongs to: `round((z - offset) * 2)`.
    ///
    /// # Examples
    /// ```
    /// use spritefield::floors::FloorLayers;
    /// let layers = FloorLayers::new(10, 0.2);
    /// assert_eq!(layers.group_index_for_z(0.0), 0);
    /// assert_eq!(layers.group_index_for_z(1.0), 2);
    /// assert_eq!(layers.group_index_for_z(1.5), 3);
    /// ```
    #[must_use]
    pub fn group_index_for_z(&self, z: f32) -> u32 {
        round_half_up_to_u32((z - self.offset) * 2.0)
    }

    /// Group a body at height `z` belongs to.
    ///
    /// Bodies standing above the tallest terrain layer get a group of their
    /// own index; no terrain collider carries it, so only other bodies at the
    /// same height can touch them.
    #[must_use]
    pub fn group_for_z(&self, z: f32) -> FloorGroup {
        FloorGroup::new(self.group_index_for_z(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.5, 1)]
    #[case(0.44, 0)]
    #[case(0.46, 1)]
    #[case(5.0, 10)]
    fn layer_index_tracks_height(#[case] z: f32, #[case] expected: u32) {
        let layers = FloorLayers::new(10, 0.2);
        assert_eq!(layers.group_index_for_z(z), expected);
    }

    #[test]
    fn standing_body_does_not_share_its_cells_groups() {
        // A body on top of a cell of height h sits in layer h; that cell's
        // colliders occupy layers 0..h.
        let layers = FloorLayers::new(10, 0.2);
        for height in 0..10_u32 {
            let z = crate::numeric::u32_to_f32(height) / 2.0;
            assert_eq!(layers.group_for_z(z).index(), height);
        }
    }

    #[test]
    fn layers_compare_by_groups_and_offset() {
        assert_eq!(FloorLayers::new(4, 0.2), FloorLayers::new(4, 0.2));
        assert_ne!(FloorLayers::new(4, 0.2), FloorLayers::new(4, 0.3));
        assert_ne!(FloorLayers::new(4, 0.2), FloorLayers::new(5, 0.2));
    }

    #[test]
    fn groups_interact_only_with_themselves() {
        let layers = FloorLayers::new(3, 0.2);
        let ground = layers.get(0).expect("layer 0");
        let first = layers.get(1).expect("layer 1");
        assert!(ground.interacts(ground));
        assert!(!ground.interacts(first));
        assert_eq!(layers.get(3), None);
        assert_eq!(layers.len(), 3);
    }
}
