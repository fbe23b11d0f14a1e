use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum HapticError {
    #[error("haptics are not supported by this hardware")]
    Unsupported,
    #[error("failed to start haptic engine: {0}")]
    EngineStart(String),
    #[error("failed to play haptic pattern: {0}")]
    Playback(String),
}

/// A transient tap at `relative_time` seconds into the pattern. Intensity and
/// sharpness are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticEvent {
    pub relative_time: f32,
    pub intensity: f32,
    pub sharpness: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HapticPattern {
    pub events: Vec<HapticEvent>,
}

impl HapticPattern {
    const STEPS: u32 = 10;

    /// A fading ramp layered over a rising one across one second.
    pub fn ramp_down_up() -> Self {
        let times = || (0..=Self::STEPS).map(|step| step as f32 / Self::STEPS as f32);
        let falling = times().map(|t| HapticEvent {
            relative_time: t,
            intensity: 1.0 - t,
            sharpness: 1.0 - t,
        });
        let rising = times().map(|t| HapticEvent {
            relative_time: t,
            intensity: t,
            sharpness: t,
        });
        Self {
            events: falling.chain(rising).collect(),
        }
    }

    pub fn duration(&self) -> f32 {
        self.events
            .iter()
            .map(|event| event.relative_time)
            .fold(0.0, f32::max)
    }
}

/// Haptic feedback hardware.
pub trait HapticEngine: Send {
    fn supports_haptics(&self) -> bool;
    fn start(&mut self) -> Result<(), HapticError>;
    fn play(&mut self, pattern: &HapticPattern) -> Result<(), HapticError>;
}

/// Plays the touch pulse once. The caller decides how to report failures.
pub fn trigger_pulse<E: HapticEngine + ?Sized>(engine: &mut E) -> Result<(), HapticError> {
    if !engine.supports_haptics() {
        return Err(HapticError::Unsupported);
    }
    engine.start()?;
    let pattern = HapticPattern::ramp_down_up();
    debug!(events = pattern.events.len(), "playing haptic pulse");
    engine.play(&pattern)
}
