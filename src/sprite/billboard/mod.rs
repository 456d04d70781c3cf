//! Camera-facing planes that display a sprite sheet for a body.

use glam::{Vec2, Vec3};
use log::warn;

use crate::assets::TextureRegistry;
use crate::body::{Body, BodyId};
use crate::input::InputState;
use crate::numeric::u32_to_f32;
use crate::sprite::sheet::{Animation, Direction, SpriteSheet};
use crate::vector_math::normalize_angle;

/// Rule used to pick the facing shown each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steering {
    /// Facing follows the body's heading relative to the viewer.
    #[default]
    CameraRelative,
    /// Facing follows the controller: keys first, then pointer drag,
    /// otherwise unchanged.
    Player,
}

/// Viewer state shared by every billboard during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewContext {
    /// Heading of the player's body, if there is a player.
    pub reference_angle: Option<f32>,
    /// Camera yaw used when there is no player.
    pub camera_yaw: f32,
    /// Camera position, once the camera has been placed.
    pub camera_position: Option<Vec3>,
    /// Player mesh position, once the player exists.
    pub player_position: Option<Vec3>,
}

impl ViewContext {
    /// Angle facings are measured against.
    #[must_use]
    pub fn reference(&self) -> f32 {
        self.reference_angle.unwrap_or(self.camera_yaw)
    }

    /// Point a billboard plane looks at so it faces the camera from behind
    /// the player.
    #[must_use]
    pub fn look_target(&self) -> Option<Vec3> {
        let camera = self.camera_position?;
        let player = self.player_position?;
        Some(Vec3::new(
            camera.x - (player.x - camera.x) * 2.0,
            camera.y,
            camera.z - (player.z - camera.z) * 2.0,
        ))
    }
}

/// Render-facing state of a billboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMesh {
    /// Plane centre in render space (`x`, height, `y`).
    pub position: Vec3,
    /// Plane width and height.
    pub size: Vec2,
    /// Horizontal mirroring sign.
    pub scale_x: f32,
    /// Texture offset of the visible frame.
    pub uv_offset: Vec2,
    /// Texture repeat covering one frame.
    pub uv_repeat: Vec2,
    /// Point the plane faces.
    pub look_at: Option<Vec3>,
    /// Whether the texture exists.
    pub visible: bool,
}

/// Construction parameters of a billboard.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardOptions {
    /// Registry key of the texture.
    pub texture: String,
    /// Uniform scale.
    pub scale: f32,
    /// Horizontal scale override.
    pub scale_x: Option<f32>,
    /// Vertical scale override.
    pub scale_y: Option<f32>,
    /// Atlas layout.
    pub sheet: SpriteSheet,
}

impl BillboardOptions {
    /// Options for `texture` at `scale` with a single-frame sheet.
    #[must_use]
    pub fn new(texture: impl Into<String>, scale: f32) -> Self {
        Self {
            texture: texture.into(),
            scale,
            scale_x: None,
            scale_y: None,
            sheet: SpriteSheet::default(),
        }
    }

    /// Replaces the sheet.
    #[must_use]
    pub fn with_sheet(mut self, sheet: SpriteSheet) -> Self {
        self.sheet = sheet;
        self
    }
}

/// A body's sprite: sheet, animation cursor and mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    body: BodyId,
    texture: String,
    sheet: SpriteSheet,
    animation: Animation,
    center_offset: f32,
    mesh: SpriteMesh,
}

impl Billboard {
    /// Builds the billboard for `body`, sizing the plane from the texture's
    /// frame cell. A missing texture yields an invisible placeholder.
    #[must_use]
    pub fn new(body: BodyId, options: &BillboardOptions, assets: &TextureRegistry) -> Self {
        let sheet = options.sheet;
        let half_x = options.scale_x.unwrap_or(options.scale) / 2.0;
        let half_y = options.scale_y.unwrap_or(options.scale) / 2.0;
        let cols = u32_to_f32(sheet.cols.max(1));
        let rows = u32_to_f32(sheet.rows.max(1));

        let (size, visible) = match assets.resolve(&options.texture) {
            Some(info) => {
                let w = u32_to_f32(info.width) / cols;
                let h = u32_to_f32(info.height) / rows;
                let max = w.max(h);
                if max > 0.0 {
                    (Vec2::new(half_x * w / max, half_y * h / max), true)
                } else {
                    warn!("texture '{}' has no pixels", options.texture);
                    (Vec2::ZERO, false)
                }
            }
            None => (Vec2::ZERO, false),
        };

        let mut billboard = Self {
            body,
            texture: options.texture.clone(),
            sheet,
            animation: Animation::default(),
            center_offset: -0.2 + half_y / 3.0,
            mesh: SpriteMesh {
                position: Vec3::ZERO,
                size,
                scale_x: 1.0,
                uv_offset: Vec2::ZERO,
                uv_repeat: Vec2::new(1.0 / cols, 1.0 / rows),
                look_at: None,
                visible,
            },
        };
        billboard.mesh.uv_offset = billboard.animation.texture_offset(&billboard.sheet);
        billboard
    }

    /// Body shown by this billboard.
    #[must_use]
    pub const fn body_id(&self) -> BodyId {
        self.body
    }

    /// Texture key.
    #[must_use]
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Atlas layout.
    #[must_use]
    pub const fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Animation cursor.
    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Mutable animation cursor.
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// Current facing.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.animation.direction
    }

    /// Vertical offset of the plane centre above the body.
    #[must_use]
    pub const fn center_offset(&self) -> f32 {
        self.center_offset
    }

    /// Render state.
    #[must_use]
    pub const fn mesh(&self) -> &SpriteMesh {
        &self.mesh
    }

    /// Facing for this frame under `steering`.
    #[must_use]
    pub fn resolve_direction(
        &self,
        steering: Steering,
        body: &Body,
        view: &ViewContext,
        input: &InputState,
    ) -> Direction {
        match steering {
            Steering::CameraRelative => {
                Direction::from_relative_angle(normalize_angle(body.pose().angle - view.reference()))
            }
            Steering::Player => player_direction(input).unwrap_or(self.animation.direction),
        }
    }

    /// Updates the facing, then the mesh.
    pub fn refresh(&mut self, steering: Steering, body: &Body, view: &ViewContext, input: &InputState) {
        self.animation.direction = self.resolve_direction(steering, body, view, input);
        self.sync_mesh(body, view);
    }

    /// Places the plane over `body` and, for animated sheets, selects the
    /// frame and mirrors sheets that lack a horizontal row.
    pub fn sync_mesh(&mut self, body: &Body, view: &ViewContext) {
        let pose = body.pose();
        self.mesh.position = Vec3::new(pose.x, pose.z + self.center_offset, pose.y);
        self.mesh.look_at = view.look_target();
        if self.sheet.total_frames <= 1 {
            return;
        }
        self.mesh.uv_offset = self.animation.texture_offset(&self.sheet);

        let rows = &self.sheet.directions_to_rows;
        if rows.has_horizontal_rows() {
            return;
        }
        let direction_x = if rows.left.is_some() { -1.0 } else { 1.0 };
        match self.animation.direction {
            Direction::Left => self.mesh.scale_x = -direction_x,
            Direction::Right => self.mesh.scale_x = direction_x,
            Direction::Up | Direction::Down => {}
        }
    }
}

/// Facing requested by a player's controls, if any.
#[must_use]
pub fn player_direction(input: &InputState) -> Option<Direction> {
    let keys = &input.keys;
    let pressed = [
        (keys.left, Direction::Left),
        (keys.right, Direction::Right),
        (keys.down, Direction::Down),
        (keys.up, Direction::Up),
    ];
    if let Some((_, direction)) = pressed.into_iter().find(|(held, _)| *held) {
        return Some(direction);
    }
    if !input.pointer.down {
        return None;
    }
    let pointer = input.pointer;
    Some(if pointer.x.abs() > pointer.y.abs() {
        if pointer.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if pointer.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    })
}
