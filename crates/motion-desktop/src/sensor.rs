use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender};
use motion_platform::{OrientationSensor, Scheduler, SensorError, Tilt, TiltCell};
use tracing::{info, warn};

/// Stand-in for a motion sensor on machines without one: writes a slow
/// Lissajous wobble into the shared cell from a background thread.
pub struct SimulatedTiltSensor {
    cell: Arc<TiltCell>,
    rate_hz: f64,
    amplitude: f64,
    worker: Option<(Sender<()>, JoinHandle<()>)>,
}

impl SimulatedTiltSensor {
    pub fn new(cell: Arc<TiltCell>, rate_hz: f64, amplitude: f64) -> Self {
        Self {
            cell,
            rate_hz,
            amplitude,
            worker: None,
        }
    }

    pub fn wobble(amplitude: f64, now: f64) -> Tilt {
        Tilt {
            pitch: amplitude * (1.1 * now).sin(),
            roll: amplitude * (0.7 * now).sin(),
            yaw: 0.0,
        }
    }
}

impl OrientationSensor for SimulatedTiltSensor {
    fn name(&self) -> &str {
        "simulated"
    }

    fn start(&mut self) -> Result<(), SensorError> {
        if self.worker.is_some() {
            return Err(SensorError::AlreadyRunning);
        }
        let (stop_sender, stop_receiver) = bounded::<()>(1);
        let scheduler = Scheduler::new(self.rate_hz);
        let cell = Arc::clone(&self.cell);
        let amplitude = self.amplitude;
        let handle = std::thread::Builder::new()
            .name("motion-tilt".into())
            .spawn(move || {
                scheduler.run(&stop_receiver, |now| {
                    cell.store(Self::wobble(amplitude, now));
                });
            })
            .map_err(|err| SensorError::Backend(err.to_string()))?;
        info!(
            "simulated tilt sensor running at {} Hz, amplitude {}",
            self.rate_hz, self.amplitude
        );
        self.worker = Some((stop_sender, handle));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SensorError> {
        let Some((stop_sender, handle)) = self.worker.take() else {
            return Ok(());
        };
        if stop_sender.send(()).is_err() {
            warn!("tilt thread already exited before stop");
        }
        handle
            .join()
            .map_err(|_| SensorError::Backend("tilt thread panicked".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_platform::SensorSubscription;
    use std::time::{Duration, Instant};

    #[test]
    fn wobble_is_level_at_time_zero() {
        assert_eq!(SimulatedTiltSensor::wobble(0.3, 0.0), Tilt::default());
    }

    #[test]
    fn wobble_stays_within_amplitude() {
        for step in 0..200 {
            let tilt = SimulatedTiltSensor::wobble(0.3, step as f64 * 0.05);
            assert!(tilt.pitch.abs() <= 0.3 && tilt.roll.abs() <= 0.3);
        }
    }

    #[test]
    fn running_sensor_writes_into_cell_until_stopped() {
        let cell = Arc::new(TiltCell::new());
        let sensor = SimulatedTiltSensor::new(Arc::clone(&cell), 500.0, 0.3);
        let mut subscription = SensorSubscription::start(Box::new(sensor)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while !cell.has_reading() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(cell.has_reading());

        subscription.stop().unwrap();
        let settled = cell.load();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cell.load(), settled);
    }

    #[test]
    fn starting_twice_is_rejected() {
        let cell = Arc::new(TiltCell::new());
        let mut sensor = SimulatedTiltSensor::new(cell, 100.0, 0.1);
        sensor.start().unwrap();
        assert!(matches!(sensor.start(), Err(SensorError::AlreadyRunning)));
        sensor.stop().unwrap();
    }
}
