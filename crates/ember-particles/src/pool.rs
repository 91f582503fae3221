//! Fixed-capacity particle pool

use crate::particle::Particle;
use crate::validate::{FiniteParticle, ParticleValidator};
use ember_core::{Camera, Canvas};
use thiserror::Error;

/// Why an insert was declined. The pool is unchanged in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("particle pool is full")]
    Full,

    #[error("particle failed validation")]
    InvalidParticle,
}

/// Swap-remove pool for O(1) particle reclaim and contiguous alive iteration.
///
/// Slots `[0, alive_count)` are active, the rest are free. Reclaiming a slot
/// moves the last active particle into it, so the active set stays a prefix
/// and a freed slot is available to the very next [`insert`](Self::insert).
pub struct ParticlePool<V = FiniteParticle> {
    particles: Vec<Particle>,
    alive_count: usize,
    validator: V,
}

impl ParticlePool<FiniteParticle> {
    /// Create a pool with the default finiteness validation.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_validator(capacity, FiniteParticle)
    }
}

impl<V: ParticleValidator> ParticlePool<V> {
    /// Create a pool that admits particles through `validator`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_validator(capacity: usize, validator: V) -> Self {
        assert!(capacity > 0, "particle pool capacity must be positive");

        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(Particle::dead());
        }
        tracing::debug!(capacity, "particle pool created");

        Self {
            particles,
            alive_count: 0,
            validator,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn is_full(&self) -> bool {
        self.alive_count >= self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive_count == 0
    }

    /// Copy `particle` into a free slot.
    pub fn insert(&mut self, particle: Particle) -> Result<(), InsertError> {
        if self.is_full() {
            return Err(InsertError::Full);
        }
        if !self.validator.validate(&particle) {
            return Err(InsertError::InvalidParticle);
        }

        self.particles[self.alive_count] = particle;
        self.alive_count += 1;
        Ok(())
    }

    /// Advance every active particle by `dt` and reclaim the expired ones.
    ///
    /// Returns how many slots were freed.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut reclaimed = 0;
        let mut i = 0;
        while i < self.alive_count {
            self.particles[i].advance(dt);
            if self.particles[i].is_expired() {
                self.alive_count -= 1;
                if i < self.alive_count {
                    self.particles.swap(i, self.alive_count);
                }
                reclaimed += 1;
                // Do not increment i: the swapped-in particle has not been advanced yet
            } else {
                i += 1;
            }
        }

        if reclaimed > 0 {
            tracing::trace!(reclaimed, alive = self.alive_count, "particles reclaimed");
        }
        reclaimed
    }

    /// Draw active particles in slot order. Does not mutate the pool.
    pub fn draw(&self, canvas: &mut dyn Canvas, camera: &Camera) {
        for particle in self.alive_slice() {
            particle.draw(canvas, camera);
        }
    }

    /// Free every slot at once
    pub fn clear(&mut self) {
        self.alive_count = 0;
    }

    /// Access alive particles slice for reading (first `alive_count` elements)
    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles[..self.alive_count]
    }
}
