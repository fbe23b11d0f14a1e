use motion_platform::{HapticEngine, HapticError, HapticPattern};
use tracing::{debug, info};

/// Desktop machines have no actuator; this engine reports the envelope it would play.
pub struct ConsoleHapticEngine {
    enabled: bool,
    started: bool,
}

impl ConsoleHapticEngine {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            started: false,
        }
    }
}

impl HapticEngine for ConsoleHapticEngine {
    fn supports_haptics(&self) -> bool {
        self.enabled
    }

    fn start(&mut self) -> Result<(), HapticError> {
        if !self.enabled {
            return Err(HapticError::EngineStart("haptics disabled".into()));
        }
        if !self.started {
            info!("console haptic engine started");
            self.started = true;
        }
        Ok(())
    }

    fn play(&mut self, pattern: &HapticPattern) -> Result<(), HapticError> {
        if !self.started {
            return Err(HapticError::Playback("engine not started".into()));
        }
        let peak = pattern
            .events
            .iter()
            .map(|event| event.intensity)
            .fold(0.0, f32::max);
        debug!(
            events = pattern.events.len(),
            duration = pattern.duration(),
            peak,
            "haptic pattern"
        );
        Ok(())
    }
}
