//! Ember Particles - fixed-capacity particle pool
//!
//! Provides pooled particle simulation with:
//! - Storage for exactly `capacity` particles, allocated once
//! - Swap-remove reclamation, so a freed slot is reusable by the next insert
//! - A swappable validation policy deciding which particles may enter the pool
//! - Burst spawning driven by a TOML-configurable [`SpawnConfig`]

pub mod curves;
pub mod particle;
pub mod pool;
pub mod rand;
pub mod spawner;
pub mod validate;

pub use particle::{Appearance, Particle};
pub use pool::{InsertError, ParticlePool};
pub use spawner::{ParticleSpawner, SpawnConfig, SpawnReport};
pub use validate::{AcceptAll, FiniteParticle, ParticleValidator};
