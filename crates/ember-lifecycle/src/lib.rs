//! Ember Lifecycle - append-only lists of transient objects
//!
//! Trails, parallax layers and enemies all share one shape: they are appended
//! at the tail, updated once per frame, drawn in insertion order, and removed
//! when they report themselves dead. [`LifecycleList`] implements that shape
//! once, generic over the payload's [`Lifecycle`] implementation.

mod list;

pub use list::{Iter, LifecycleList, NodeId};

use ember_core::{Camera, Canvas};

/// Per-frame behavior of a list payload
pub trait Lifecycle {
    /// Read-only frame state the payload needs during `update`
    type Env: ?Sized;

    fn update(&mut self, env: &Self::Env, dt: f32);

    fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera);

    /// Checked right after `update`; a dead payload is unlinked and dropped
    fn is_dead(&self) -> bool;
}
