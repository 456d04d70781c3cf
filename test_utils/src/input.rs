//! Input snapshots built from host key names.

use spritefield::input::InputState;

/// Nothing pressed.
pub fn idle() -> InputState {
    InputState::default()
}

/// Input with each named key held, e.g. `holding(&["ArrowUp", " "])`.
///
/// # Panics
/// Panics on a key name the controller does not map.
pub fn holding(keys: &[&str]) -> InputState {
    let mut input = InputState::default();
    for key in keys {
        assert!(input.on_key(key, true), "unmapped key {key:?}");
    }
    input
}
