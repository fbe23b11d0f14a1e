//! Platform abstraction traits so `motion-core` stays OS-agnostic.

mod clock;
mod haptics;
mod orientation;

pub use clock::{MonotonicClock, Scheduler};
pub use haptics::{trigger_pulse, HapticEngine, HapticError, HapticEvent, HapticPattern};
pub use orientation::{OrientationSensor, SensorError, SensorSubscription, Tilt, TiltCell};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
