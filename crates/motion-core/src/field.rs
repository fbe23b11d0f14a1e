use std::collections::HashSet;

use glam::DVec2;
use tracing::trace;

use crate::particle::Particle;

/// Seconds a particle stays alive after creation.
pub const LIFETIME: f64 = 1.0;
/// Hue advance per emitted particle.
pub const HUE_STEP: f64 = 0.01;

/// Live particle set plus the emitter state that feeds it.
///
/// `update` is the only way particles enter or leave the set; it is meant to be
/// driven from a single frame timeline.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: HashSet<Particle>,
    emission_point: DVec2,
    hue_cursor: f64,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            particles: HashSet::new(),
            emission_point: DVec2::splat(0.5),
            hue_cursor: 0.0,
        }
    }
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expires particles born before `now - LIFETIME`, then emits one new
    /// particle at the emission point and advances the hue cursor.
    pub fn update(&mut self, now: f64) {
        let death_time = now - LIFETIME;
        let before = self.particles.len();
        self.particles
            .retain(|particle| particle.creation_time >= death_time);
        let expired = before - self.particles.len();
        if expired > 0 {
            trace!(expired, live = self.particles.len(), "expired particles");
        }

        self.particles.insert(Particle::new(
            self.emission_point.x,
            self.emission_point.y,
            now,
            self.hue_cursor,
        ));

        self.hue_cursor += HUE_STEP;
        if self.hue_cursor >= 1.0 {
            self.hue_cursor -= 1.0;
        }
    }

    /// Out-of-range points are accepted and simply draw off-canvas.
    pub fn set_emission_point(&mut self, x: f64, y: f64) {
        self.emission_point = DVec2::new(x, y);
    }

    pub fn emission_point(&self) -> DVec2 {
        self.emission_point
    }

    pub fn hue_cursor(&self) -> f64 {
        self.hue_cursor
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
