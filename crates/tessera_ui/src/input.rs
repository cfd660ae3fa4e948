//! Per-frame input snapshot.
//!
//! The host feeds device events into an [`InputSnapshot`] and hands it to
//! `UiContext::update`. Polling devices is the host's job.

use crate::geometry::Vec2;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Editing and navigation keys the toolkit reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Pointer position in screen pixels.
    pub pointer: Vec2,
    /// Pointer position last frame.
    pub prev_pointer: Vec2,
    buttons_pressed: u8,
    buttons_released: u8,
    buttons_down: u8,
    /// Wheel delta this frame; positive y scrolls content up.
    pub scroll_delta: Vec2,
    /// Modifier keys state.
    pub modifiers: Modifiers,
    keys_pressed: Vec<Key>,
    keys_down: Vec<Key>,
    /// Text typed this frame.
    pub text_input: String,
}

impl InputSnapshot {
    /// Creates a new empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.prev_pointer = self.pointer;
        self.buttons_pressed = 0;
        self.buttons_released = 0;
        self.scroll_delta = Vec2::ZERO;
        self.keys_pressed.clear();
        self.text_input.clear();
    }

    /// Updates the pointer position.
    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Records a mouse button press.
    pub fn press(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a mouse button release.
    pub fn release(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_released |= mask;
        self.buttons_down &= !mask;
    }

    /// Records wheel input.
    pub fn scroll(&mut self, delta: Vec2) {
        self.scroll_delta += delta;
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_down.retain(|&k| k != key);
    }

    /// Records text input.
    pub fn text(&mut self, text: &str) {
        self.text_input.push_str(text);
    }

    /// Returns true if the button went down this frame.
    #[must_use]
    pub fn pressed(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the button was released this frame.
    #[must_use]
    pub fn released(&self, button: MouseButton) -> bool {
        (self.buttons_released & Self::button_mask(button)) != 0
    }

    /// Returns true if the button is currently held.
    #[must_use]
    pub fn held(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Keys pressed this frame, in order.
    #[must_use]
    pub fn keys_pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Pointer movement since last frame.
    #[must_use]
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.prev_pointer
    }

    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputSnapshot::new();

        input.press(MouseButton::Left);
        assert!(input.pressed(MouseButton::Left));
        assert!(input.held(MouseButton::Left));

        input.begin_frame();
        assert!(!input.pressed(MouseButton::Left));
        assert!(input.held(MouseButton::Left));

        input.release(MouseButton::Left);
        assert!(input.released(MouseButton::Left));
        assert!(!input.held(MouseButton::Left));
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputSnapshot::new();
        input.set_pointer(Vec2::new(10.0, 10.0));
        input.begin_frame();
        input.set_pointer(Vec2::new(15.0, 7.0));
        assert_eq!(input.pointer_delta(), Vec2::new(5.0, -3.0));
    }

    #[test]
    fn test_keys_are_edge_triggered() {
        let mut input = InputSnapshot::new();
        input.key_down(Key::Backspace);
        input.key_down(Key::Backspace);
        assert_eq!(input.keys_pressed(), &[Key::Backspace]);
        input.begin_frame();
        assert!(!input.key_pressed(Key::Backspace));
        assert!(input.key_held(Key::Backspace));
    }
}
