//! Sprite sheet layout and directional frame selection.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::FRAME_DURATION_MS;
use crate::numeric::{floor_to_index, u32_to_f32};
use crate::vector_math::normalize_angle;

/// Facing of a sprite relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Facing away.
    #[default]
    Up,
    /// Facing right.
    Right,
    /// Facing the viewer.
    Down,
    /// Facing left.
    Left,
}

impl Direction {
    /// Directions in index order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Quadrant of a relative angle: `ALL[floor(2·angle/π) mod 4]`.
    ///
    /// Total over every input; non-finite angles face up.
    ///
    /// # Examples
    /// ```
    /// use spritefield::sprite::Direction;
    /// assert_eq!(Direction::from_relative_angle(0.1), Direction::Up);
    /// assert_eq!(Direction::from_relative_angle(3.2), Direction::Down);
    /// assert_eq!(Direction::from_relative_angle(-0.1), Direction::Left);
    /// ```
    #[must_use]
    pub fn from_relative_angle(angle: f32) -> Self {
        let quadrant = 2.0 * normalize_angle(angle) / PI;
        floor_to_index(quadrant, Self::ALL.len())
            .and_then(|index| Self::ALL.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Whether the direction is left or right.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Row offsets per direction, counted up from the bottom animation row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsToRows {
    /// Row for [`Direction::Up`].
    pub up: Option<f32>,
    /// Row for [`Direction::Right`].
    pub right: Option<f32>,
    /// Row for [`Direction::Down`].
    pub down: Option<f32>,
    /// Row for [`Direction::Left`].
    pub left: Option<f32>,
    /// Row for directions without their own entry.
    pub default: Option<f32>,
}

impl DirectionsToRows {
    /// Single-row sheet used by every direction.
    pub const SINGLE_ROW: Self = Self {
        up: None,
        right: None,
        down: None,
        left: None,
        default: Some(0.0),
    };

    const fn entry(&self, direction: Direction) -> Option<f32> {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    /// Row offset of `direction`, falling back to `default`, then zero.
    #[must_use]
    pub fn row_offset(&self, direction: Direction) -> f32 {
        self.entry(direction).or(self.default).unwrap_or(0.0)
    }

    /// Whether the sheet has rows for both horizontal directions.
    #[must_use]
    pub const fn has_horizontal_rows(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// Atlas layout of an animated sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    /// Frames per row.
    pub cols: u32,
    /// Rows in the atlas.
    pub rows: u32,
    /// Frames in one direction's animation.
    pub total_frames: u32,
    /// Milliseconds per frame.
    pub frame_duration_ms: f32,
    /// Row lookup by facing.
    pub directions_to_rows: DirectionsToRows,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            cols: 1,
            rows: 1,
            total_frames: 1,
            frame_duration_ms: FRAME_DURATION_MS,
            directions_to_rows: DirectionsToRows::SINGLE_ROW,
        }
    }
}

impl SpriteSheet {
    /// Three-frame, four-direction character sheet.
    pub const CHARACTER: Self = Self {
        cols: 3,
        rows: 4,
        total_frames: 3,
        frame_duration_ms: FRAME_DURATION_MS,
        directions_to_rows: DirectionsToRows {
            down: Some(0.0),
            left: Some(1.0),
            up: Some(2.0),
            right: Some(3.0),
            default: None,
        },
    };

    fn cols_f32(&self) -> f32 {
        u32_to_f32(self.cols.max(1))
    }

    fn rows_f32(&self) -> f32 {
        u32_to_f32(self.rows.max(1))
    }

    fn total_f32(&self) -> f32 {
        u32_to_f32(self.total_frames.max(1))
    }

    /// First atlas row of `direction`'s animation, counted from the top of
    /// texture space: `rows - total_frames/cols - row_offset`.
    #[must_use]
    pub fn row(&self, direction: Direction) -> f32 {
        self.rows_f32()
            - self.total_f32() / self.cols_f32()
            - self.directions_to_rows.row_offset(direction)
    }

    /// UV offset of `frame` for `direction`.
    ///
    /// # Examples
    /// ```
    /// use spritefield::sprite::{Direction, DirectionsToRows, SpriteSheet};
    ///
    /// let sheet = SpriteSheet {
    ///     cols: 3,
    ///     rows: 4,
    ///     total_frames: 3,
    ///     directions_to_rows: DirectionsToRows { down: Some(0.0), ..DirectionsToRows::default() },
    ///     ..SpriteSheet::default()
    /// };
    /// let offset = sheet.texture_offset(1.7, Direction::Down);
    /// assert!((offset.x - 1.0 / 3.0).abs() < 1e-6);
    /// assert!((offset.y - 0.75).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn texture_offset(&self, frame: f32, direction: Direction) -> Vec2 {
        let cols = self.cols_f32();
        let index = frame.max(0.0).floor();
        let col = index % cols;
        let row = (index / cols).floor() + self.row(direction);
        Vec2::new(col / cols, row / self.rows_f32())
    }

    /// `frame` advanced by `ms` and wrapped into `[0, total_frames)`.
    #[must_use]
    pub fn advance_frame(&self, frame: f32, ms: f32) -> f32 {
        let total = self.total_f32();
        let duration = if self.frame_duration_ms > 0.0 {
            self.frame_duration_ms
        } else {
            FRAME_DURATION_MS
        };
        let next = (frame + ms / duration).rem_euclid(total);
        if next.is_finite() && next < total {
            next
        } else {
            0.0
        }
    }
}

/// Animation cursor of one sprite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Animation {
    /// Continuous frame position.
    pub frame: f32,
    /// Current facing.
    pub direction: Direction,
}

impl Animation {
    /// Advances the frame by `ms` on `sheet`.
    pub fn advance(&mut self, ms: f32, sheet: &SpriteSheet) {
        self.frame = sheet.advance_frame(self.frame, ms);
    }

    /// UV offset for the current frame and facing.
    #[must_use]
    pub fn texture_offset(&self, sheet: &SpriteSheet) -> Vec2 {
        sheet.texture_offset(self.frame, self.direction)
    }
}
