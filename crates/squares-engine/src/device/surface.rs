//! Pure surface-configuration choices, kept apart from [`Gpu`](super::Gpu)
//! so they can be tested without an adapter.

use winit::dpi::PhysicalSize;

const LINEAR: [wgpu::TextureFormat; 2] =
    [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm];

const SRGB: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Picks a swapchain format from `offered`.
///
/// An 8-bit format of the requested encoding wins; otherwise the first
/// offered format. `None` only if nothing is offered.
pub(crate) fn choose_surface_format(
    offered: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let wanted = if prefer_srgb { SRGB } else { LINEAR };
    wanted
        .into_iter()
        .find(|f| offered.contains(f))
        .or_else(|| offered.first().copied())
}

pub(crate) fn choose_alpha_mode(
    offered: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| offered.contains(m))
        .or_else(|| offered.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// wgpu refuses to configure a 0x0 surface (minimized window).
#[inline]
pub(crate) fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}
