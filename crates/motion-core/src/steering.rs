use glam::{DVec2, Vec2};

/// Device tilt around the screen centre: roll steers x, pitch steers y.
pub fn tilt_to_emission(pitch: f64, roll: f64) -> DVec2 {
    DVec2::new(0.5 + roll, 0.5 + pitch)
}

/// Normalizes a canvas-space pointer position. A degenerate canvas maps to the centre.
pub fn pointer_to_emission(position: Vec2, size: Vec2) -> DVec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return DVec2::splat(0.5);
    }
    (position / size).as_dvec2()
}

/// What the input glue observed this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteeringInput {
    /// Normalized pointer position while a pointer is held down.
    pub pointer: Option<DVec2>,
    /// Latest `(pitch, roll)` once the sensor has reported at least once.
    pub tilt: Option<(f64, f64)>,
}

/// Picks the emission point for a frame: a held pointer wins over tilt, and
/// with neither the previous point is kept.
#[derive(Debug, Clone, Copy)]
pub struct EmissionSteering {
    last: DVec2,
}

impl Default for EmissionSteering {
    fn default() -> Self {
        Self {
            last: DVec2::splat(0.5),
        }
    }
}

impl EmissionSteering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, input: SteeringInput) -> DVec2 {
        if let Some(pointer) = input.pointer {
            self.last = pointer;
        } else if let Some((pitch, roll)) = input.tilt {
            self.last = tilt_to_emission(pitch, roll);
        }
        self.last
    }

    pub fn last(&self) -> DVec2 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_device_emits_from_centre() {
        assert_eq!(tilt_to_emission(0.0, 0.0), DVec2::splat(0.5));
        assert_eq!(tilt_to_emission(0.25, -0.125), DVec2::new(0.375, 0.75));
    }

    #[test]
    fn pointer_is_normalized_by_canvas_size() {
        let point = pointer_to_emission(Vec2::new(50.0, 10.0), Vec2::new(200.0, 40.0));
        assert_eq!(point, DVec2::new(0.25, 0.25));
    }

    #[test]
    fn zero_sized_canvas_maps_pointer_to_centre() {
        let point = pointer_to_emission(Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert_eq!(point, DVec2::splat(0.5));
    }

    #[test]
    fn held_pointer_overrides_tilt() {
        let mut steering = EmissionSteering::new();
        let point = steering.resolve(SteeringInput {
            pointer: Some(DVec2::new(0.1, 0.9)),
            tilt: Some((0.2, 0.2)),
        });
        assert_eq!(point, DVec2::new(0.1, 0.9));
    }

    #[test]
    fn tilt_steers_when_pointer_released() {
        let mut steering = EmissionSteering::new();
        steering.resolve(SteeringInput {
            pointer: Some(DVec2::new(0.1, 0.9)),
            tilt: None,
        });
        let point = steering.resolve(SteeringInput {
            pointer: None,
            tilt: Some((0.0, 0.25)),
        });
        assert_eq!(point, DVec2::new(0.75, 0.5));
    }

    #[test]
    fn last_point_is_kept_without_input() {
        let mut steering = EmissionSteering::new();
        steering.resolve(SteeringInput {
            pointer: Some(DVec2::new(0.3, 0.6)),
            tilt: None,
        });
        assert_eq!(steering.resolve(SteeringInput::default()), DVec2::new(0.3, 0.6));
    }
}
