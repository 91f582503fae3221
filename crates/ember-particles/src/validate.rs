//! Admission policies for the particle pool

use crate::particle::{Appearance, Particle};

/// Decides whether a particle may be inserted into a pool.
///
/// Implemented for any `Fn(&Particle) -> bool`, so ad hoc rules can be passed
/// as closures.
pub trait ParticleValidator {
    fn validate(&self, particle: &Particle) -> bool;
}

impl<F> ParticleValidator for F
where
    F: Fn(&Particle) -> bool,
{
    fn validate(&self, particle: &Particle) -> bool {
        self(particle)
    }
}

/// Default policy: all numeric state finite, lifetime positive and the
/// appearance well formed.
#[derive(Clone, Copy, Debug, Default)]
pub struct FiniteParticle;

impl ParticleValidator for FiniteParticle {
    fn validate(&self, p: &Particle) -> bool {
        let state_ok = p.position.is_finite()
            && p.velocity.is_finite()
            && p.life.is_finite()
            && p.life > 0.0
            && p.max_life.is_finite()
            && p.color.is_finite();
        let size_ok = p.size.is_finite() && p.size.x > 0.0 && p.size.y > 0.0;

        let appearance_ok = match &p.appearance {
            Appearance::Solid => true,
            Appearance::Animated {
                frames,
                frame_time,
                frame,
                ..
            } => {
                *frames > 0
                    && *frame < *frames
                    && frame_time.is_finite()
                    && *frame_time > 0.0
            }
        };

        state_ok && size_ok && appearance_ok
    }
}

/// Admits everything
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ParticleValidator for AcceptAll {
    fn validate(&self, _particle: &Particle) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{SheetId, SheetRegistry, Vec2};

    fn base() -> Particle {
        Particle::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0), 1.0)
    }

    fn spark() -> SheetId {
        SheetRegistry::new().register("spark")
    }

    #[test]
    fn accepts_well_formed() {
        assert!(FiniteParticle.validate(&base()));
        assert!(FiniteParticle.validate(&base().animated(spark(), 4, 0.05)));
    }

    #[test]
    fn rejects_non_finite_state() {
        let mut p = base();
        p.velocity.y = f32::INFINITY;
        assert!(!FiniteParticle.validate(&p));

        let mut p = base();
        p.life = f32::NAN;
        assert!(!FiniteParticle.validate(&p));
    }

    #[test]
    fn rejects_frame_past_the_sheet() {
        let mut p = base().animated(spark(), 4, 0.05);
        if let Appearance::Animated { frame, .. } = &mut p.appearance {
            *frame = 4;
        }
        assert!(!FiniteParticle.validate(&p));
    }

    #[test]
    fn rejects_already_dead() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0);
        assert!(!FiniteParticle.validate(&p));
    }

    #[test]
    fn rejects_malformed_animation() {
        assert!(!FiniteParticle.validate(&base().animated(spark(), 0, 0.05)));
        assert!(!FiniteParticle.validate(&base().animated(spark(), 4, 0.0)));
    }

    #[test]
    fn rejects_degenerate_size() {
        assert!(!FiniteParticle.validate(&base().with_size(Vec2::new(0.0, 3.0))));
    }
}
