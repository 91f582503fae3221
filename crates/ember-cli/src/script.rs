//! Scripted input for headless runs
//!
//! ```toml
//! [[event]]
//! from = 0
//! to = 120
//! pointer = [350.0, 200.0]
//! buttons = ["left"]
//! keys = ["ArrowRight"]
//! ```
//!
//! An event holds its keys and buttons down for frames `from..to` and, while
//! active, places the pointer.

use ember_core::{EmberError, Result, Vec2};
use ember_runtime::{key_from_name, InputState, MouseButton};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use winit::keyboard::KeyCode;

#[derive(Debug, Default, Deserialize)]
struct ScriptFile {
    #[serde(default, rename = "event")]
    events: Vec<EventDef>,
}

#[derive(Debug, Deserialize)]
struct EventDef {
    from: u64,
    to: u64,
    pointer: Option<[f32; 2]>,
    #[serde(default)]
    buttons: Vec<String>,
    #[serde(default)]
    keys: Vec<String>,
}

#[derive(Debug, Clone)]
struct ScriptEvent {
    from: u64,
    to: u64,
    pointer: Option<Vec2>,
    buttons: Vec<MouseButton>,
    keys: Vec<KeyCode>,
}

impl ScriptEvent {
    fn active(&self, frame: u64) -> bool {
        (self.from..self.to).contains(&frame)
    }
}

/// Replays a parsed script into an [`InputState`] frame by frame
#[derive(Debug, Default)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ScriptFile = toml::from_str(content)?;
        let mut events = Vec::with_capacity(file.events.len());

        for (i, def) in file.events.into_iter().enumerate() {
            if def.to < def.from {
                return Err(EmberError::ScriptError(format!(
                    "event {i}: `to` ({}) is before `from` ({})",
                    def.to, def.from
                )));
            }
            let keys = def
                .keys
                .iter()
                .map(|name| {
                    key_from_name(name).ok_or_else(|| {
                        EmberError::ScriptError(format!("event {i}: unknown key {name:?}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let buttons = def
                .buttons
                .iter()
                .map(|name| {
                    MouseButton::from_name(name).ok_or_else(|| {
                        EmberError::ScriptError(format!("event {i}: unknown button {name:?}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            events.push(ScriptEvent {
                from: def.from,
                to: def.to,
                pointer: def.pointer.map(Vec2::from_array),
                buttons,
                keys,
            });
        }

        Ok(Self {
            events,
            ..Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Bring `input` to the state the script describes for `frame`.
    ///
    /// Only transitions are fed to the input state, so "just pressed" queries
    /// behave as with live input.
    pub fn apply(&mut self, frame: u64, input: &mut InputState) {
        let mut keys = HashSet::new();
        let mut buttons = HashSet::new();
        for event in self.events.iter().filter(|e| e.active(frame)) {
            keys.extend(event.keys.iter().copied());
            buttons.extend(event.buttons.iter().copied());
            if let Some(pointer) = event.pointer {
                input.process_pointer_move(pointer.x, pointer.y);
            }
        }

        for key in self.held_keys.difference(&keys) {
            input.process_key_up(*key);
        }
        for key in keys.difference(&self.held_keys) {
            input.process_key_down(*key);
        }
        for button in self.held_buttons.difference(&buttons) {
            input.process_mouse_button_up(*button);
        }
        for button in buttons.difference(&self.held_buttons) {
            input.process_mouse_button_down(*button);
        }

        self.held_keys = keys;
        self.held_buttons = buttons;
    }
}
