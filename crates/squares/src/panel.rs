use squares_engine::coords::ColorRgba;

use crate::config::SceneConfig;

/// Live-tuning knobs edited through the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningPanel {
    /// Horizontal speed of the moving square, pixels per second.
    pub velocity: f32,
    /// Rotation speed of the spinning square, degrees per second.
    pub angle_rate: f32,
    /// Fill of the center square.
    pub fill: [f32; 3],
}

impl TuningPanel {
    pub fn new(cfg: &SceneConfig) -> Self {
        Self {
            velocity: 0.0,
            angle_rate: 0.0,
            fill: cfg.initial_fill.rgb(),
        }
    }

    pub fn fill_color(&self) -> ColorRgba {
        ColorRgba::from_rgb(self.fill)
    }

    /// Draws the "Button" window and applies any edits.
    pub fn show(&mut self, ctx: &egui::Context, cfg: &SceneConfig) {
        egui::Window::new("Button")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::DragValue::new(&mut self.velocity)
                            .range(cfg.velocity_range.clone())
                            .speed(cfg.drag_speed),
                    );
                    ui.label("valocity");
                });
                ui.horizontal(|ui| {
                    ui.add(
                        egui::DragValue::new(&mut self.angle_rate)
                            .range(cfg.angle_rate_range.clone())
                            .speed(cfg.drag_speed),
                    );
                    ui.label("angle");
                });
                ui.horizontal(|ui| {
                    ui.color_edit_button_rgb(&mut self.fill);
                    ui.label("clear color");
                });
            });

        self.clamp(cfg);
    }

    /// Keeps the knobs inside their ranges when edited outside of a drag.
    fn clamp(&mut self, cfg: &SceneConfig) {
        self.velocity = self
            .velocity
            .clamp(*cfg.velocity_range.start(), *cfg.velocity_range.end());
        self.angle_rate = self
            .angle_rate
            .clamp(*cfg.angle_rate_range.start(), *cfg.angle_rate_range.end());
        for c in &mut self.fill {
            *c = c.clamp(0.0, 1.0);
        }
    }
}
