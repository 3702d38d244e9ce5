/// Device and surface options, fixed for the life of the window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Ask for an sRGB swapchain format.
    ///
    /// Off by default: vertex colors are written to a linear 8-bit surface
    /// unchanged, so a picked color shows exactly as picked.
    pub prefer_srgb: bool,

    /// FIFO (vsync) paces the continuous redraw loop.
    pub present_mode: wgpu::PresentMode,

    /// Used only if the surface supports it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint for how many frames may be queued ahead of the display.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
