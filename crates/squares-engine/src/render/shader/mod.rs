//! Shader programs: two WGSL stages read from disk, compiled separately and
//! linked into one render pipeline with a named uniform block.

mod program;
mod uniforms;

pub use program::{
    truncate_log, ProgramDesc, ShaderError, ShaderProgram, ShaderSources, ShaderStage,
    MAX_LOG_BYTES,
};
pub use uniforms::{UniformBlock, UniformError, UniformField, UniformKind, UniformLocation};
