//! Ember Runtime - Game loop infrastructure
//!
//! Provides the building blocks the frame driver consumes:
//! - `GameClock` — fixed-timestep accumulator for deterministic updates
//! - `InputState` — pointer, mouse button and keyboard snapshot with named actions

mod clock;
mod input;

pub use clock::GameClock;
pub use input::{key_from_name, InputState, MouseButton};
