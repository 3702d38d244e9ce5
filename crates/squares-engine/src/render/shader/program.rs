use std::fmt;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec4};
use wgpu::util::DeviceExt;

use super::uniforms::{UniformBlock, UniformError, UniformField};

/// Compiler and linker diagnostics are cut to this many bytes.
pub const MAX_LOG_BYTES: usize = 512;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read {stage} shader '{path}': {source}")]
    Read {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },

    #[error(transparent)]
    Uniform(#[from] UniformError),
}

/// Cuts `log` to at most [`MAX_LOG_BYTES`] bytes without splitting a character.
pub fn truncate_log(log: &str) -> String {
    if log.len() <= MAX_LOG_BYTES {
        return log.to_owned();
    }
    let mut end = MAX_LOG_BYTES;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].to_owned()
}

/// WGSL source text of both stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Reads both stages from disk.
    pub fn read(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_stage(ShaderStage::Vertex, vertex_path.as_ref())?,
            fragment: read_stage(ShaderStage::Fragment, fragment_path.as_ref())?,
        })
    }

    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

/// Everything besides the source text needed to link a program.
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    /// Bind group layouts placed after the uniform block (group 1 onward).
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    /// Uniform block fields, in WGSL struct order. Bound at group 0, binding 0.
    pub uniforms: &'a [UniformField<'a>],
    pub target_format: wgpu::TextureFormat,
    pub blend: Option<wgpu::BlendState>,
}

/// A linked vertex + fragment pipeline and its uniform block.
///
/// GPU objects are released when the program is dropped.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniforms: UniformBlock,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a render pipeline.
    ///
    /// Each stage is compiled in its own validation error scope so a failure
    /// names the stage; pipeline creation is checked the same way.
    pub fn link(
        device: &wgpu::Device,
        sources: &ShaderSources,
        desc: &ProgramDesc<'_>,
    ) -> Result<Self, ShaderError> {
        let uniforms = UniformBlock::new(desc.uniforms)?;

        let vs = compile_stage(device, desc.label, sources, ShaderStage::Vertex)?;
        let fs = compile_stage(device, desc.label, sources, ShaderStage::Fragment)?;

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(desc.label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniforms.size() as u64),
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(desc.label),
            contents: uniforms.bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(desc.label),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let mut bind_group_layouts = Vec::with_capacity(1 + desc.bind_group_layouts.len());
        bind_group_layouts.push(&uniform_layout);
        bind_group_layouts.extend_from_slice(desc.bind_group_layouts);

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &bind_group_layouts,
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(desc.vertex_entry),
                compilation_options: Default::default(),
                buffers: desc.vertex_buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(desc.fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.target_format,
                    blend: desc.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link {
                log: truncate_log(&err.to_string()),
            });
        }

        log::debug!(
            "linked program '{}' ({} byte uniform block)",
            desc.label,
            uniforms.size()
        );

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniforms,
        })
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError> {
        self.uniforms.set_int(name, value)
    }

    pub fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError> {
        self.uniforms.set_int_array(name, values)
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        self.uniforms.set_float(name, value)
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) -> Result<(), UniformError> {
        self.uniforms.set_vec4(name, value)
    }

    pub fn set_mat4(&mut self, name: &str, value: &Mat4) -> Result<(), UniformError> {
        self.uniforms.set_mat4(name, value)
    }

    /// Uploads the uniform block if a setter ran since the last upload.
    pub fn flush(&mut self, queue: &wgpu::Queue) {
        if self.uniforms.take_dirty() {
            queue.write_buffer(&self.uniform_buffer, 0, self.uniforms.bytes());
        }
    }

    /// Sets the pipeline and the uniform block (group 0) on `rpass`.
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
    }
}

fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    sources: &ShaderSources,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} ({stage})")),
        source: wgpu::ShaderSource::Wgsl(sources.source(stage).into()),
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(ShaderError::Compile {
            stage,
            log: truncate_log(&err.to_string()),
        }),
        None => Ok(module),
    }
}
