//! Keyboard and pointer state fed into steering.
//!
//! The host translates its events into calls on [`InputState`]; the
//! simulation only reads the resulting snapshot. NPCs own an `InputState`
//! of their own that their brain writes instead.

use glam::Vec2;

use crate::constants::{DOUBLE_CLICK_MS, JUMP_PULSE_MS};

/// Vertical pointer position treated as neutral, as a fraction of the
/// viewport height.
const POINTER_CENTER_Y: f32 = 0.75;
/// Dead zone around the neutral pointer height.
const POINTER_MARGIN_Y: f32 = 0.1;

/// Pressed state of the steering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    /// Forward.
    pub up: bool,
    /// Backward.
    pub down: bool,
    /// Turn left.
    pub left: bool,
    /// Turn right.
    pub right: bool,
    /// Jump.
    pub space: bool,
}

impl KeyState {
    /// Applies a key event by DOM key name. Returns `false` for keys that
    /// do not steer.
    ///
    /// # Examples
    /// ```
    /// use spritefield::input::KeyState;
    /// let mut keys = KeyState::default();
    /// assert!(keys.set_key("ArrowLeft", true));
    /// assert!(!keys.set_key("Escape", true));
    /// assert!(keys.left);
    /// ```
    pub fn set_key(&mut self, name: &str, pressed: bool) -> bool {
        let slot = match name {
            "ArrowUp" => &mut self.up,
            "ArrowDown" => &mut self.down,
            "ArrowLeft" => &mut self.left,
            "ArrowRight" => &mut self.right,
            " " => &mut self.space,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Whether any key is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.any_movement() || self.space
    }

    /// Whether any arrow key is held.
    #[must_use]
    pub const fn any_movement(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Releases the arrow keys.
    pub const fn release_movement(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }
}

/// Pointer position normalised to the viewport.
///
/// `x` spans `[-1, 1]` left to right; `y` is zero at three quarters of the
/// viewport height and grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    /// Horizontal offset from the viewport centre.
    pub x: f32,
    /// Vertical offset from the neutral line.
    pub y: f32,
    /// Whether a button or touch is held.
    pub down: bool,
}

impl Pointer {
    /// Offsets as a vector.
    #[must_use]
    pub const fn vector(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Keys, pointer and the transient jump pulse of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// Steering keys.
    pub keys: KeyState,
    /// Pointer drag.
    pub pointer: Pointer,
    last_down_ms: Option<f64>,
    pulse_ms: f32,
}

impl InputState {
    /// Creates an idle input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `keys` with the pointer at `pointer`, no pulse pending.
    #[must_use]
    pub const fn from_controls(keys: KeyState, pointer: Pointer) -> Self {
        Self {
            keys,
            pointer,
            last_down_ms: None,
            pulse_ms: 0.0,
        }
    }

    /// Applies a key event; see [`KeyState::set_key`].
    pub fn on_key(&mut self, name: &str, pressed: bool) -> bool {
        self.keys.set_key(name, pressed)
    }

    /// Tracks the pointer. While it is held, its height presses forward or
    /// backward.
    pub const fn on_move(&mut self, page: Vec2, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        self.pointer.x = page.x / viewport.x * 2.0 - 1.0;
        self.pointer.y = page.y / viewport.y - POINTER_CENTER_Y;
        self.apply_drag();
    }

    /// Presses the pointer at `now_ms`. A second press within the
    /// double-click window holds `space` for a short pulse.
    pub fn on_down(&mut self, now_ms: f64) {
        if self
            .last_down_ms
            .is_some_and(|last| now_ms - last < f64::from(DOUBLE_CLICK_MS))
        {
            self.keys.space = true;
            self.pulse_ms = JUMP_PULSE_MS;
        }
        self.last_down_ms = Some(now_ms);
        self.pointer.down = true;
        self.apply_drag();
    }

    /// Releases the pointer and every arrow key.
    pub const fn on_up(&mut self) {
        self.pointer.down = false;
        self.keys.release_movement();
    }

    /// Advances timers by `ms`, ending an expired jump pulse.
    pub const fn advance(&mut self, ms: f32) {
        if self.pulse_ms <= 0.0 {
            return;
        }
        self.pulse_ms -= ms;
        if self.pulse_ms <= 0.0 {
            self.pulse_ms = 0.0;
            self.keys.space = false;
        }
    }

    /// Whether a pointer drag is steering.
    #[must_use]
    pub const fn dragging(&self) -> bool {
        self.pointer.down
    }

    /// Whether anything is steering: a held arrow key or a drag.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.keys.any_movement() || self.pointer.down
    }

    const fn apply_drag(&mut self) {
        if self.pointer.down {
            self.keys.up = self.pointer.y < -POINTER_MARGIN_Y;
            self.keys.down = self.pointer.y > POINTER_MARGIN_Y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[rstest]
    #[case("ArrowUp")]
    #[case("ArrowDown")]
    #[case("ArrowLeft")]
    #[case("ArrowRight")]
    #[case(" ")]
    fn steering_keys_register(#[case] name: &str) {
        let mut keys = KeyState::default();
        assert!(keys.set_key(name, true));
        assert!(keys.any());
        keys.set_key(name, false);
        assert!(!keys.any());
    }

    #[test]
    fn pointer_is_normalised_to_viewport() {
        let mut input = InputState::new();
        input.on_move(Vec2::new(600.0, 150.0), VIEWPORT);
        assert_relative_eq!(input.pointer.x, 0.5);
        assert_relative_eq!(input.pointer.y, -0.5);
        assert!(!input.keys.up, "hover alone does not steer");

        input.on_down(1_000.0);
        assert!(input.keys.up);
        input.on_move(Vec2::new(400.0, 540.0), VIEWPORT);
        assert!(input.keys.down && !input.keys.up);
        input.on_up();
        assert!(!input.active());
    }

    #[test]
    fn double_click_pulses_jump() {
        let mut input = InputState::new();
        input.on_down(1_000.0);
        input.on_up();
        assert!(!input.keys.space);
        input.on_down(1_300.0);
        assert!(input.keys.space);
        input.advance(150.0);
        assert!(input.keys.space);
        input.advance(60.0);
        assert!(!input.keys.space);
    }

    #[test]
    fn slow_clicks_do_not_jump() {
        let mut input = InputState::new();
        input.on_down(0.0);
        input.on_down(500.0);
        assert!(!input.keys.space);
    }

    #[test]
    fn controls_start_without_a_pulse() {
        let keys = KeyState {
            space: true,
            ..KeyState::default()
        };
        let mut input = InputState::from_controls(keys, Pointer::default());
        input.advance(1_000.0);
        assert!(input.keys.space, "held space is not a pulse");
        input.on_down(0.0);
        assert!(!input.keys.up, "first press is not a double click");
    }

    #[test]
    fn held_space_survives_advance() {
        let mut input = InputState::new();
        input.on_key(" ", true);
        input.advance(1_000.0);
        assert!(input.keys.space);
    }
}
