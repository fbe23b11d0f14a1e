use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Device attitude in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

/// Latest tilt reading, written by a sensor thread and read by the frame loop.
///
/// Each axis is stored independently; a reader may see pitch from one write and
/// roll from the next.
#[derive(Debug, Default)]
pub struct TiltCell {
    pitch: AtomicU64,
    roll: AtomicU64,
    yaw: AtomicU64,
    has_reading: AtomicBool,
}

impl TiltCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, tilt: Tilt) {
        self.pitch.store(tilt.pitch.to_bits(), Ordering::Relaxed);
        self.roll.store(tilt.roll.to_bits(), Ordering::Relaxed);
        self.yaw.store(tilt.yaw.to_bits(), Ordering::Relaxed);
        self.has_reading.store(true, Ordering::Release);
    }

    pub fn load(&self) -> Tilt {
        Tilt {
            pitch: f64::from_bits(self.pitch.load(Ordering::Relaxed)),
            roll: f64::from_bits(self.roll.load(Ordering::Relaxed)),
            yaw: f64::from_bits(self.yaw.load(Ordering::Relaxed)),
        }
    }

    /// Whether any sensor has written to this cell yet.
    pub fn has_reading(&self) -> bool {
        self.has_reading.load(Ordering::Acquire)
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("orientation sensor is not available on this device")]
    Unavailable,
    #[error("orientation sensor is already running")]
    AlreadyRunning,
    #[error("orientation sensor failed: {0}")]
    Backend(String),
}

/// Source of device attitude updates, delivered asynchronously into a [`TiltCell`].
pub trait OrientationSensor: Send {
    fn name(&self) -> &str;
    fn start(&mut self) -> Result<(), SensorError>;
    fn stop(&mut self) -> Result<(), SensorError>;
}

/// Keeps a sensor running for as long as it is held. Dropping it stops the sensor.
pub struct SensorSubscription {
    sensor: Box<dyn OrientationSensor>,
    active: bool,
}

impl SensorSubscription {
    pub fn start(mut sensor: Box<dyn OrientationSensor>) -> Result<Self, SensorError> {
        sensor.start()?;
        info!("orientation sensor '{}' started", sensor.name());
        Ok(Self {
            sensor,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Releases the sensor. Calling it again is a no-op.
    pub fn stop(&mut self) -> Result<(), SensorError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.sensor.stop()?;
        info!("orientation sensor '{}' stopped", self.sensor.name());
        Ok(())
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("failed to stop orientation sensor on drop: {err}");
        }
    }
}
