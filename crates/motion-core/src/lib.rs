//! Motion core: platform-agnostic particle emitter, mirrored draw transform and emission steering.

mod field;
mod particle;
mod render;
mod steering;

pub use field::{ParticleField, HUE_STEP, LIFETIME};
pub use particle::Particle;
pub use render::{
    hue_tint, mirrored_draws, opacity_at, render_mirrored, BlendMode, Mirror, SpriteDraw,
    SpriteSink, MIRRORS,
};
pub use steering::{pointer_to_emission, tilt_to_emission, EmissionSteering, SteeringInput};
