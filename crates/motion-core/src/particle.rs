use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single spark. Identity is the full value: two particles born at the same
/// instant with the same position and hue are the same particle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub creation_time: f64,
    pub hue: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, creation_time: f64, hue: f64) -> Self {
        Self {
            x,
            y,
            creation_time,
            hue,
        }
    }

    /// Seconds elapsed since birth as seen from `now`.
    pub fn age(&self, now: f64) -> f64 {
        now - self.creation_time
    }

    fn bits(&self) -> [u64; 4] {
        [
            self.x.to_bits(),
            self.y.to_bits(),
            self.creation_time.to_bits(),
            self.hue.to_bits(),
        ]
    }
}

// Bitwise comparison keeps Eq and Hash consistent for floats.
impl PartialEq for Particle {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Particle {}

impl Hash for Particle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
