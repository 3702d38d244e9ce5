//! Immediate-mode debug overlay (egui) drawn on top of the scene.
//!
//! The overlay owns the egui context, the winit input bridge and the wgpu
//! paint backend. The application supplies the UI closure each frame.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::render::{RenderCtx, RenderTarget};

pub struct Overlay {
    ctx: egui::Context,
    input: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pending: PendingPaint,
}

/// UI output waiting for the next `paint`.
///
/// Texture deltas accumulate across runs until painted; a frame skipped on a
/// surface error must not lose the font atlas upload.
#[derive(Default)]
struct PendingPaint {
    jobs: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    ready: bool,
}

impl PendingPaint {
    fn stage(&mut self, jobs: Vec<egui::ClippedPrimitive>, textures: egui::TexturesDelta) {
        self.jobs = jobs;
        self.textures.append(textures);
        self.ready = true;
    }
}

impl Overlay {
    pub fn new(window: &Window, device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::dark());

        let input = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            egui_wgpu::RendererOptions::default(),
        );

        log::debug!("overlay initialized for {surface_format:?}");

        Self {
            ctx,
            input,
            renderer,
            pending: PendingPaint::default(),
        }
    }

    /// Forwards a window event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.input.on_window_event(window, event).consumed
    }

    /// Runs one UI pass and tessellates its output for the next [`paint`](Self::paint).
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) {
        let raw_input = self.input.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, build);

        self.input
            .handle_platform_output(window, full_output.platform_output);

        let jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.pending.stage(jobs, full_output.textures_delta);
    }

    /// Paints the last UI pass over the target. No-op if `run` was not called.
    pub fn paint(&mut self, rctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if !self.pending.ready {
            return;
        }
        self.pending.ready = false;

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: rctx.surface_size,
            pixels_per_point: self.ctx.pixels_per_point(),
        };

        for (id, delta) in self.pending.textures.set.drain(..) {
            self.renderer
                .update_texture(rctx.device, rctx.queue, id, &delta);
        }

        let extra = self.renderer.update_buffers(
            rctx.device,
            rctx.queue,
            &mut *target.encoder,
            &self.pending.jobs,
            &screen,
        );
        if !extra.is_empty() {
            rctx.queue.submit(extra);
        }

        {
            let rpass = target.load_pass("squares overlay pass");
            self.renderer
                .render(&mut rpass.forget_lifetime(), &self.pending.jobs, &screen);
        }

        for id in self.pending.textures.free.drain(..) {
            self.renderer.free_texture(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_frame(ctx: &egui::Context) -> egui::FullOutput {
        ctx.run(egui::RawInput::default(), |ctx| {
            egui::Window::new("Button").show(ctx, |ui| {
                ui.label("valocity");
            });
        })
    }

    fn stage(pending: &mut PendingPaint, ctx: &egui::Context, out: egui::FullOutput) {
        let jobs = ctx.tessellate(out.shapes, out.pixels_per_point);
        pending.stage(jobs, out.textures_delta);
    }

    // ── pending textures ────────────────────────────────────────────────

    #[test]
    fn first_frame_uploads_font_atlas() {
        let ctx = egui::Context::default();
        let mut pending = PendingPaint::default();
        stage(&mut pending, &ctx, ui_frame(&ctx));

        assert!(pending.ready);
        assert!(pending
            .textures
            .set
            .iter()
            .any(|(id, _)| *id == egui::TextureId::default()));
    }

    #[test]
    fn unpainted_texture_uploads_survive_the_next_run() {
        let ctx = egui::Context::default();
        let mut pending = PendingPaint::default();

        stage(&mut pending, &ctx, ui_frame(&ctx));
        let first = pending.textures.set.len();
        assert!(first > 0);

        // No paint in between, as when the surface skips a frame.
        let second = ui_frame(&ctx);
        let added = second.textures_delta.set.len();
        stage(&mut pending, &ctx, second);

        assert_eq!(pending.textures.set.len(), first + added);
        assert!(pending
            .textures
            .set
            .iter()
            .any(|(id, _)| *id == egui::TextureId::default()));
    }
}
