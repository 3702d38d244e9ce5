use std::ops::RangeInclusive;
use std::path::PathBuf;

use winit::dpi::LogicalSize;

use squares_engine::coords::{ColorRgba, Viewport};
use squares_engine::window::RuntimeConfig;

/// Number of squares drawn each frame.
pub const QUAD_COUNT: usize = 5;

/// Immutable scene configuration, built once and handed to the app.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub title: String,
    pub viewport: Viewport,
    /// Edge length of every square, in pixels.
    pub square_size: f32,

    /// Bound to texture units 0 and 1, in order.
    pub texture_paths: [PathBuf; 2],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,

    pub clear_color: ColorRgba,
    /// Starting fill of the center square; the panel edits it afterwards.
    pub initial_fill: ColorRgba,
    /// Fixed colors of squares 1 to 4.
    pub quad_colors: [ColorRgba; QUAD_COUNT - 1],

    pub velocity_range: RangeInclusive<f32>,
    pub angle_rate_range: RangeInclusive<f32>,
    /// Knob change per dragged pixel.
    pub drag_speed: f64,
}

impl SceneConfig {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(
                f64::from(self.viewport.width),
                f64::from(self.viewport.height),
            ),
            resizable: false,
        }
    }

    /// Left and right turn-around points of the moving square.
    pub fn bounce_bounds(&self) -> (f32, f32) {
        let w = self.viewport.width;
        (w / 3.0, 2.0 * w / 3.0)
    }
}

fn asset(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(rel)
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Program".to_string(),
            viewport: Viewport::new(1280.0, 720.0),
            square_size: 50.0,

            texture_paths: [asset("textures/tex1.png"), asset("textures/tex2.png")],
            vertex_shader: asset("shaders/quad.vert.wgsl"),
            fragment_shader: asset("shaders/quad.frag.wgsl"),

            clear_color: ColorRgba::black(),
            initial_fill: ColorRgba::new(0.45, 0.55, 0.60, 1.0),
            quad_colors: [
                ColorRgba::new(0.06, 0.71, 0.29, 1.0),
                ColorRgba::new(0.33, 0.63, 0.94, 1.0),
                ColorRgba::new(0.99, 0.85, 0.09, 1.0),
                ColorRgba::new(0.48, 0.24, 0.91, 1.0),
            ],

            velocity_range: 0.0..=10000.0,
            angle_rate_range: 0.0..=720.0,
            drag_speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_window_contract() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.title, "Program");
        assert_eq!(cfg.viewport, Viewport::new(1280.0, 720.0));

        let rt = cfg.runtime_config();
        assert_eq!(rt.initial_size, LogicalSize::new(1280.0, 720.0));
        assert!(!rt.resizable);
    }

    #[test]
    fn asset_paths_are_under_the_crate() {
        let cfg = SceneConfig::default();
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        for p in cfg.texture_paths.iter().chain([&cfg.vertex_shader, &cfg.fragment_shader]) {
            assert!(p.starts_with(&root), "{p:?}");
        }
    }

    #[test]
    fn shipped_assets_exist() {
        let cfg = SceneConfig::default();
        for p in cfg.texture_paths.iter().chain([&cfg.vertex_shader, &cfg.fragment_shader]) {
            assert!(p.is_file(), "missing asset {p:?}");
        }
    }

    #[test]
    fn bounce_bounds_are_thirds() {
        let cfg = SceneConfig::default();
        let (lo, hi) = cfg.bounce_bounds();
        assert!((lo - 1280.0 / 3.0).abs() < 1e-3);
        assert!((hi - 2.0 * 1280.0 / 3.0).abs() < 1e-3);
    }
}
