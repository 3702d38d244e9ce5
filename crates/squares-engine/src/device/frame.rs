/// One acquired swapchain image plus the encoder recording into it.
///
/// The next image cannot be acquired while this one is held; hand it to
/// [`Gpu::submit`](super::Gpu::submit) within the same redraw.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
