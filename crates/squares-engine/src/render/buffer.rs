//! Fixed-size GPU geometry buffers.
//!
//! The vertex buffer has a fixed capacity chosen at creation and is rewritten
//! in full on every upload. The index buffer is written once.

use std::marker::PhantomData;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("upload of {len} vertices does not match buffer capacity {capacity}")]
    SizeMismatch { len: usize, capacity: usize },
}

/// Checks that an upload of `len` elements rewrites a buffer of `capacity`
/// elements exactly.
pub fn check_full_overwrite(len: usize, capacity: usize) -> Result<(), BufferError> {
    if len == capacity {
        Ok(())
    } else {
        Err(BufferError::SizeMismatch { len, capacity })
    }
}

/// Dynamic vertex buffer with room for exactly `capacity` vertices of type `V`.
pub struct VertexBuffer<V> {
    buffer: wgpu::Buffer,
    capacity: usize,
    _vertex: PhantomData<V>,
}

impl<V: Pod> VertexBuffer<V> {
    /// Allocates the buffer. Contents start zeroed.
    pub fn with_capacity(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: Self::byte_len(capacity),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            _vertex: PhantomData,
        }
    }

    /// Replaces the whole contents with `vertices`.
    ///
    /// `vertices.len()` must equal the capacity; partial writes are refused.
    pub fn overwrite(&self, queue: &wgpu::Queue, vertices: &[V]) -> Result<(), BufferError> {
        check_full_overwrite(vertices.len(), self.capacity)?;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        Ok(())
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn byte_len(capacity: usize) -> u64 {
        (capacity * std::mem::size_of::<V>()) as u64
    }
}

/// Static `u32` index buffer.
pub struct IndexBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    pub fn new(device: &wgpu::Device, label: &str, indices: &[u32]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            buffer,
            count: indices.len() as u32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Vertex;

    #[test]
    fn full_overwrite_only() {
        assert_eq!(check_full_overwrite(20, 20), Ok(()));
        assert_eq!(
            check_full_overwrite(16, 20),
            Err(BufferError::SizeMismatch { len: 16, capacity: 20 })
        );
        assert!(check_full_overwrite(24, 20).is_err());
    }

    #[test]
    fn twenty_vertices_take_eight_hundred_bytes() {
        assert_eq!(VertexBuffer::<Vertex>::byte_len(20), 800);
    }

    #[test]
    fn uploaded_bytes_mirror_vertex_array() {
        let vertices = [Vertex {
            position: [1.0, 2.0, 0.0],
            color: [0.1, 0.2, 0.3, 1.0],
            tex_coords: [1.0, 0.0],
            tex_index: 1.0,
        }; 20];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len() as u64, VertexBuffer::<Vertex>::byte_len(20));
        let back: &[Vertex] = bytemuck::cast_slice(bytes);
        assert_eq!(back, &vertices[..]);
    }
}
