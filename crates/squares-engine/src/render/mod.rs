//! GPU rendering subsystem.
//!
//! Resource wrappers own exactly one kind of GPU object each and release it
//! on drop:
//! - [`VertexBuffer`] / [`IndexBuffer`] for geometry
//! - [`Texture`] / [`TextureUnits`] for sampled images
//! - [`ShaderProgram`] for the pipeline and its uniform block
//!
//! Convention: CPU geometry is in viewport pixels (bottom-left origin, +Y up);
//! the vertex shader applies a projection uniform.

mod buffer;
mod ctx;
pub mod shader;
pub mod texture;
mod vertex;

pub use buffer::{check_full_overwrite, BufferError, IndexBuffer, VertexBuffer};
pub use ctx::{RenderCtx, RenderTarget};
pub use shader::{ProgramDesc, ShaderError, ShaderProgram, ShaderSources};
pub use texture::{decode_rgba, DecodedImage, Texture, TextureError, TextureUnits};
pub use vertex::{
    quad_indices, square, Vertex, QUAD_INDEX_COUNT, QUAD_INDICES, QUAD_TEX_COORDS,
    QUAD_VERTEX_COUNT,
};
