//! egui front-end: draws the mirrored particle field and turns pointer drags into emission
//! and haptics.

mod sprite;

use std::sync::Arc;
use std::time::Duration;

use egui::{Color32, Pos2, Sense};
use motion_core::{
    pointer_to_emission, render_mirrored, EmissionSteering, ParticleField, SteeringInput,
};
use motion_platform::{
    trigger_pulse, HapticEngine, HapticError, MonotonicClock, Scheduler, TiltCell,
};
use tracing::{debug, info, warn};

pub use sprite::{spark_color_image, spark_image, MeshSink, SPARK_SIZE};

/// On-screen size of one spark sprite in points.
const SPRITE_POINTS: f32 = 48.0;

pub struct UiOptions {
    pub title: String,
    pub inner_size: [f32; 2],
    pub frame_rate_hz: f64,
    pub tilt: Arc<TiltCell>,
    pub haptics: Box<dyn HapticEngine>,
}

/// Runs the window on the calling thread until it is closed.
pub fn run_ui(options: UiOptions) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(options.title.clone())
            .with_inner_size(options.inner_size),
        ..Default::default()
    };
    let title = options.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |creation_context| {
            let spark = creation_context.egui_ctx.load_texture(
                "spark",
                spark_color_image(SPARK_SIZE),
                egui::TextureOptions::LINEAR,
            );
            info!("UI ready; spark texture uploaded");
            Ok(Box::new(MotionApp::new(options, spark)))
        }),
    )
}

pub struct MotionApp {
    field: ParticleField,
    steering: EmissionSteering,
    clock: MonotonicClock,
    frame_period: Duration,
    tilt: Arc<TiltCell>,
    haptics: Box<dyn HapticEngine>,
    spark: egui::TextureHandle,
    last_pointer: Option<Pos2>,
}

impl MotionApp {
    fn new(options: UiOptions, spark: egui::TextureHandle) -> Self {
        let scheduler = Scheduler::new(options.frame_rate_hz);
        Self {
            field: ParticleField::new(),
            steering: EmissionSteering::new(),
            clock: scheduler.clock(),
            frame_period: scheduler.period(),
            tilt: options.tilt,
            haptics: options.haptics,
            spark,
            last_pointer: None,
        }
    }

}

/// Fires the touch pulse and logs any failure instead of propagating it.
/// Returns whether the pattern played.
fn pulse_logged(engine: &mut dyn HapticEngine) -> bool {
    match trigger_pulse(engine) {
        Ok(()) => true,
        Err(HapticError::Unsupported) => {
            debug!("haptics unsupported; pulse skipped");
            false
        }
        Err(err) => {
            warn!("haptic pulse failed: {err}");
            false
        }
    }
}

/// A press or a move while pressed counts as a new pointer event.
fn pointer_changed(previous: Option<Pos2>, current: Option<Pos2>) -> bool {
    match (previous, current) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(previous), Some(current)) => previous != current,
    }
}

impl eframe::App for MotionApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.clock.now();
        self.field.update(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(Color32::BLACK))
            .show(context, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(rect, ui.id().with("canvas"), Sense::click_and_drag());
                let size = glam::Vec2::new(rect.width(), rect.height());

                let pointer_pos = if response.is_pointer_button_down_on() {
                    response.interact_pointer_pos()
                } else {
                    None
                };
                if pointer_changed(self.last_pointer, pointer_pos) {
                    pulse_logged(self.haptics.as_mut());
                }
                self.last_pointer = pointer_pos;

                let pointer = pointer_pos.map(|pos| {
                    let local = pos - rect.min;
                    pointer_to_emission(glam::Vec2::new(local.x, local.y), size)
                });
                let tilt = self.tilt.has_reading().then(|| {
                    let tilt = self.tilt.load();
                    (tilt.pitch, tilt.roll)
                });
                let point = self.steering.resolve(SteeringInput { pointer, tilt });
                self.field.set_emission_point(point.x, point.y);

                let mut sink = MeshSink::new(
                    self.spark.id(),
                    rect.min,
                    egui::Vec2::splat(SPRITE_POINTS),
                );
                render_mirrored(&self.field, size, now, &mut sink);
                ui.painter().add(egui::Shape::mesh(sink.into_mesh()));
            });

        context.request_repaint_after(self.frame_period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use motion_platform::HapticPattern;

    struct BrokenEngine {
        supported: bool,
        plays: usize,
    }

    impl HapticEngine for BrokenEngine {
        fn supports_haptics(&self) -> bool {
            self.supported
        }

        fn start(&mut self) -> Result<(), HapticError> {
            Ok(())
        }

        fn play(&mut self, _pattern: &HapticPattern) -> Result<(), HapticError> {
            self.plays += 1;
            Err(HapticError::Playback("actuator offline".into()))
        }
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let mut engine = BrokenEngine {
            supported: true,
            plays: 0,
        };
        assert!(!pulse_logged(&mut engine));
        assert!(!pulse_logged(&mut engine));
        assert_eq!(engine.plays, 2);
    }

    #[test]
    fn unsupported_hardware_is_swallowed_without_playing() {
        let mut engine = BrokenEngine {
            supported: false,
            plays: 0,
        };
        assert!(!pulse_logged(&mut engine));
        assert_eq!(engine.plays, 0);
    }

    #[test]
    fn press_counts_as_pointer_event() {
        assert!(pointer_changed(None, Some(pos2(1.0, 1.0))));
    }

    #[test]
    fn stationary_hold_is_not_a_new_event() {
        assert!(!pointer_changed(Some(pos2(1.0, 1.0)), Some(pos2(1.0, 1.0))));
    }

    #[test]
    fn drag_movement_is_a_new_event() {
        assert!(pointer_changed(Some(pos2(1.0, 1.0)), Some(pos2(2.0, 1.0))));
    }

    #[test]
    fn release_is_not_a_pointer_event() {
        assert!(!pointer_changed(Some(pos2(1.0, 1.0)), None));
        assert!(!pointer_changed(None, None));
    }
}
