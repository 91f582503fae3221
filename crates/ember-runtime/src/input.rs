//! Input state management

use ember_core::Vec2;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Pointer buttons the runtime tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Tracks keyboard and pointer input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held
    mouse_buttons_down: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<MouseButton>,

    /// Current pointer position in screen pixels
    pointer: Vec2,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,

    /// Mouse button action map: action name -> list of buttons
    mouse_button_map: HashMap<String, Vec<MouseButton>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            pointer: Vec2::ZERO,
            action_map: Self::default_action_map(),
            mouse_button_map: Self::default_mouse_button_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("move_left".into(), vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert("move_right".into(), vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert("jump".into(), vec![KeyCode::Space]);
        map
    }

    fn default_mouse_button_map() -> HashMap<String, Vec<MouseButton>> {
        let mut map = HashMap::new();
        map.insert("spawn".into(), vec![MouseButton::Left]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Bind an action to one or more mouse buttons
    pub fn bind_mouse_action(&mut self, action: impl Into<String>, buttons: Vec<MouseButton>) {
        self.mouse_button_map.insert(action.into(), buttons);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: MouseButton) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Process pointer movement
    pub fn process_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Release every key and button (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.mouse_buttons_down.clear();
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_buttons_just_pressed.clear();
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_down.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_just_pressed.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// -1, 0 or 1 from a pair of opposing actions
    pub fn axis(&self, negative: &str, positive: &str) -> f32 {
        let mut value = 0.0;
        if self.is_action_pressed(negative) {
            value -= 1.0;
        }
        if self.is_action_pressed(positive) {
            value += 1.0;
        }
        value
    }

    /// Current pointer position in screen pixels
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Is a mouse button currently held?
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }
}

/// Resolve a key name as written in input scripts (`"KeyA"`, `"ArrowLeft"`, `"Space"`)
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let key = match name {
        "KeyA" => KeyCode::KeyA,
        "KeyD" => KeyCode::KeyD,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space,
        _ => return None,
    };
    Some(key)
}
