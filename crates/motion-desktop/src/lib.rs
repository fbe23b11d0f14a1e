//! Desktop implementations of the Motion collaborators and the app entry.
use std::sync::Arc;

use motion_platform::{Result, SensorSubscription, TiltCell};
use motion_ui::{run_ui, UiOptions};
use tracing::{info, warn};

mod config;
mod haptics;
mod sensor;

pub use crate::config::{
    ConfigError, HapticsConfig, MotionConfig, SensorConfig, WindowConfig, CONFIG_FILE_NAME,
};
pub use crate::haptics::ConsoleHapticEngine;
pub use crate::sensor::SimulatedTiltSensor;

// Public app entry ----------------
/// Start the tilt sensor, open the window, and release the sensor once the window closes.
pub fn run_app(config: MotionConfig) -> Result<()> {
    let tilt = Arc::new(TiltCell::new());

    let mut subscription = if config.sensor.enabled {
        let sensor = SimulatedTiltSensor::new(
            Arc::clone(&tilt),
            config.sensor.rate_hz,
            config.sensor.amplitude,
        );
        match SensorSubscription::start(Box::new(sensor)) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                warn!("tilt input unavailable, continuing with pointer only: {err}");
                None
            }
        }
    } else {
        info!("tilt sensor disabled in configuration");
        None
    };

    let options = UiOptions {
        title: config.window.title.clone(),
        inner_size: [config.window.width, config.window.height],
        frame_rate_hz: config.frame_rate_hz,
        tilt,
        haptics: Box::new(ConsoleHapticEngine::new(config.haptics.enabled)),
    };
    let outcome = run_ui(options);

    // Cleanup
    if let Some(subscription) = subscription.as_mut() {
        release_sensor(subscription);
    }
    outcome.map_err(|err| err.to_string())?;
    info!("window closed");
    Ok(())
}

/// Stops the sensor, logging a failure so it never masks how the window exited.
fn release_sensor(subscription: &mut SensorSubscription) -> bool {
    match subscription.stop() {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to stop orientation sensor: {err}");
            false
        }
    }
}
