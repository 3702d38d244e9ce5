//! Texture loading: decode an image file to RGBA8 and upload it as a sampled
//! 2D texture, plus binding a fixed set of textures to numbered units.

use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;

/// Errors produced while turning an image file into a GPU texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{path}' has zero size ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// CPU-side RGBA8 pixels ready for upload.
///
/// Rows are stored bottom-up: the image is flipped vertically on decode so
/// texture coordinate `(0, 0)` addresses the bottom-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Returns the RGBA value at `(x, row)` where row 0 is the first stored row.
    pub fn pixel(&self, x: u32, row: u32) -> Option<[u8; 4]> {
        if x >= self.width || row >= self.height {
            return None;
        }
        let i = ((row * self.width + x) * 4) as usize;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }
}

/// Decodes `path` to 4 channels per pixel and flips it vertically.
pub fn decode_rgba(path: impl AsRef<Path>) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = img.flipv().into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    log::debug!("decoded texture '{}' ({width}x{height})", path.display());

    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// A sampled 2D texture with its own sampler (linear filtering, clamp to edge).
///
/// The GPU objects are released when this value is dropped.
pub struct Texture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl Texture {
    /// Internal format of every loaded texture.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Decodes `path` and uploads it.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = decode_rgba(path)?;
        let label = path.display().to_string();
        Ok(Self::from_image(device, queue, &image, &label))
    }

    /// Uploads already-decoded pixels.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: Self::FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.pixels,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            view,
            sampler,
            width: image.width,
            height: image.height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

/// Binds textures to fixed, numbered units.
///
/// Unit `i` occupies binding `2i` (texture) and `2i + 1` (its sampler) in a
/// single bind group. The set is fixed at creation.
pub struct TextureUnits {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl TextureUnits {
    pub fn new(device: &wgpu::Device, label: &str, textures: &[&Texture]) -> Self {
        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = (0..textures.len() as u32)
            .flat_map(|unit| {
                [
                    wgpu::BindGroupLayoutEntry {
                        binding: texture_binding(unit),
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: sampler_binding(unit),
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ]
            })
            .collect();

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &layout_entries,
        });

        let entries: Vec<wgpu::BindGroupEntry> = textures
            .iter()
            .zip(0u32..)
            .flat_map(|(tex, unit)| {
                [
                    wgpu::BindGroupEntry {
                        binding: texture_binding(unit),
                        resource: wgpu::BindingResource::TextureView(tex.view()),
                    },
                    wgpu::BindGroupEntry {
                        binding: sampler_binding(unit),
                        resource: wgpu::BindingResource::Sampler(tex.sampler()),
                    },
                ]
            })
            .collect();

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &entries,
        });

        Self {
            layout,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Binding slot of unit `unit`'s texture view.
pub const fn texture_binding(unit: u32) -> u32 {
    unit * 2
}

/// Binding slot of unit `unit`'s sampler.
pub const fn sampler_binding(unit: u32) -> u32 {
    unit * 2 + 1
}
