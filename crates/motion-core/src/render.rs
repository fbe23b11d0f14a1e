use glam::{DVec2, Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::field::ParticleField;
use crate::particle::Particle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Overlapping sprites accumulate instead of occluding each other.
    Additive,
}

/// One reflection of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mirror {
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Identity first, then the three reflections, so every particle radiates from all four corners.
pub const MIRRORS: [Mirror; 4] = [
    Mirror {
        flip_x: false,
        flip_y: false,
    },
    Mirror {
        flip_x: true,
        flip_y: false,
    },
    Mirror {
        flip_x: false,
        flip_y: true,
    },
    Mirror {
        flip_x: true,
        flip_y: true,
    },
];

impl Mirror {
    /// Maps a normalized point onto a canvas of `size` pixels under this reflection.
    pub fn apply(&self, point: DVec2, size: Vec2) -> Vec2 {
        let size = size.as_dvec2();
        let mut x = point.x * size.x;
        let mut y = point.y * size.y;
        if self.flip_x {
            x = size.x - x;
        }
        if self.flip_y {
            y = size.y - y;
        }
        DVec2::new(x, y).as_vec2()
    }
}

/// A single sprite draw in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub position: Vec2,
    pub tint: Vec4,
    /// Not clamped: stale frame times can push this outside [0, 1].
    pub opacity: f32,
}

/// Receiver of draw instructions, implemented by whatever paints the canvas.
pub trait SpriteSink {
    fn set_blend_mode(&mut self, mode: BlendMode);
    fn draw_sprite(&mut self, draw: &SpriteDraw);
}

/// Fully saturated, full brightness colour for `hue` in [0, 1).
pub fn hue_tint(hue: f64) -> Vec4 {
    let h = (hue.rem_euclid(1.0) * 6.0) as f32;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Vec4::new(r, g, b, 1.0)
}

/// Linear fade from 1 at birth to 0 at the end of the lifetime.
pub fn opacity_at(particle: &Particle, now: f64) -> f32 {
    (1.0 - particle.age(now)) as f32
}

/// Every draw for the current frame: each live particle under each of the four mirrors.
pub fn mirrored_draws(field: &ParticleField, size: Vec2, now: f64) -> Vec<SpriteDraw> {
    let mut draws = Vec::with_capacity(field.len() * MIRRORS.len());
    for particle in field.particles() {
        let tint = hue_tint(particle.hue);
        let opacity = opacity_at(particle, now);
        let point = DVec2::new(particle.x, particle.y);
        for mirror in MIRRORS.iter() {
            draws.push(SpriteDraw {
                position: mirror.apply(point, size),
                tint,
                opacity,
            });
        }
    }
    draws
}

/// Switches the sink to additive blending and issues the frame's draws.
pub fn render_mirrored<S: SpriteSink + ?Sized>(
    field: &ParticleField,
    size: Vec2,
    now: f64,
    sink: &mut S,
) {
    sink.set_blend_mode(BlendMode::Additive);
    for draw in mirrored_draws(field, size, now) {
        sink.draw_sprite(&draw);
    }
}
