use anyhow::Context;
use winit::event::WindowEvent;

use squares_engine::core::{App, AppControl, FrameCtx, InitCtx, WindowCtx};
use squares_engine::overlay::Overlay;
use squares_engine::render::shader::{UniformField, UniformKind};
use squares_engine::render::{
    quad_indices, IndexBuffer, ProgramDesc, ShaderProgram, ShaderSources, Texture, TextureUnits,
    Vertex, VertexBuffer,
};

use crate::animation::Animation;
use crate::config::{QUAD_COUNT, SceneConfig};
use crate::panel::TuningPanel;
use crate::scene::{build_vertices, VERTEX_COUNT};

const U_MVP: &str = "u_mvp";
const U_TEXTURES: &str = "u_textures";

/// Uniform block of the quad program, in WGSL struct order.
const UNIFORMS: [UniformField<'static>; 2] = [
    UniformField::new(U_MVP, UniformKind::Mat4),
    UniformField::new(U_TEXTURES, UniformKind::IntArray(2)),
];

/// GPU resources owned by the running scene. Dropped together at shutdown.
struct Resources {
    _textures: [Texture; 2],
    units: TextureUnits,
    program: ShaderProgram,
    vertices: VertexBuffer<Vertex>,
    indices: IndexBuffer,
    overlay: Overlay,
}

enum Phase {
    Initializing,
    Running(Box<Resources>),
    ShuttingDown,
}

/// The five-squares frame loop.
pub struct SquaresApp {
    config: SceneConfig,
    phase: Phase,
    animation: Animation,
    panel: TuningPanel,
}

impl SquaresApp {
    pub fn new(config: SceneConfig) -> Self {
        let animation = Animation::new(config.viewport.width / 2.0, config.bounce_bounds());
        let panel = TuningPanel::new(&config);
        Self {
            config,
            phase: Phase::Initializing,
            animation,
            panel,
        }
    }
}

impl App for SquaresApp {
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<()> {
        let cfg = &self.config;
        anyhow::ensure!(cfg.viewport.is_valid(), "invalid viewport {:?}", cfg.viewport);

        let device = ctx.gpu.device();
        let queue = ctx.gpu.queue();
        let format = ctx.gpu.surface_format();

        let overlay = Overlay::new(ctx.window.window, device, format);

        let [path0, path1] = &cfg.texture_paths;
        let tex0 = Texture::load(device, queue, path0)
            .with_context(|| format!("failed to load texture {}", path0.display()))?;
        let tex1 = Texture::load(device, queue, path1)
            .with_context(|| format!("failed to load texture {}", path1.display()))?;
        log::debug!("textures loaded: {:?} {:?}", tex0.size(), tex1.size());
        let units = TextureUnits::new(device, "squares textures", &[&tex0, &tex1]);

        let sources = ShaderSources::read(&cfg.vertex_shader, &cfg.fragment_shader)?;
        let mut program = ShaderProgram::link(
            device,
            &sources,
            &ProgramDesc {
                label: "squares quad program",
                vertex_entry: "vs_main",
                fragment_entry: "fs_main",
                vertex_buffers: &[Vertex::layout()],
                bind_group_layouts: &[units.layout()],
                uniforms: &UNIFORMS,
                target_format: format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            },
        )
        .context("failed to build quad shader program")?;

        program.set_int_array(U_TEXTURES, &[0, 1])?;
        program.set_mat4(U_MVP, &cfg.viewport.ortho())?;
        program.flush(queue);

        let vertices = VertexBuffer::with_capacity(device, "squares vertices", VERTEX_COUNT);
        let indices = IndexBuffer::new(device, "squares indices", &quad_indices(QUAD_COUNT));

        self.phase = Phase::Running(Box::new(Resources {
            _textures: [tex0, tex1],
            units,
            program,
            vertices,
            indices,
            overlay,
        }));

        log::info!(
            "scene ready: {QUAD_COUNT} squares, {} indices, {format:?}",
            quad_indices(QUAD_COUNT).len()
        );
        Ok(())
    }

    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        if let Phase::Running(res) = &mut self.phase {
            res.overlay.on_window_event(window.window, event);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Phase::Running(res) = &mut self.phase else {
            return AppControl::Continue;
        };
        let cfg = &self.config;
        let panel = &mut self.panel;

        // UI pass: the panel may change the knobs used below.
        res.overlay
            .run(ctx.window.window, |egui_ctx| panel.show(egui_ctx, cfg));

        self.animation
            .advance(ctx.time.elapsed, panel.velocity, panel.angle_rate);

        let vertices = build_vertices(cfg, &self.animation, panel.fill_color());
        let queue = ctx.gpu.queue();
        if let Err(err) = res.vertices.overwrite(queue, &vertices) {
            log::error!("vertex upload failed: {err}");
            return AppControl::Exit;
        }
        res.program.flush(queue);

        ctx.render(cfg.clear_color, |rctx, target| {
            {
                let mut rpass = target.load_pass("squares quad pass");
                res.program.bind(&mut rpass);
                rpass.set_bind_group(1, res.units.bind_group(), &[]);
                rpass.set_vertex_buffer(0, res.vertices.slice());
                rpass.set_index_buffer(res.indices.slice(), IndexBuffer::FORMAT);
                rpass.draw_indexed(0..res.indices.count(), 0, 0..1);
            }

            // Painted after the quads so the panel stays on top.
            res.overlay.paint(rctx, target);
        })
    }

    fn on_exit(&mut self) {
        log::info!("shutting down");
        self.phase = Phase::ShuttingDown;
    }
}
