//! Quad vertex format and the procedural square generator.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::coords::ColorRgba;

/// Per-vertex data for textured, tinted quads.
///
/// ```text
/// Vertex (40 bytes)
/// position [f32; 3]  offset 0   location(0)
/// color    [f32; 4]  offset 12  location(1)
/// uv       [f32; 2]  offset 28  location(2)
/// tex_idx  f32       offset 36  location(3)
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
    /// Selects the texture unit the fragment shader samples.
    pub tex_index: f32,
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2, // tex_coords
        3 => Float32    // tex_index
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertices per quad.
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Indices per quad (two triangles).
pub const QUAD_INDEX_COUNT: usize = 6;

/// Index pattern of one quad relative to its first vertex.
pub const QUAD_INDICES: [u32; QUAD_INDEX_COUNT] = [0, 1, 2, 2, 3, 0];

/// Texture coordinates in vertex order: bottom-left, bottom-right, top-right, top-left.
pub const QUAD_TEX_COORDS: [[f32; 2]; QUAD_VERTEX_COUNT] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Builds a square of edge `size` centered at `center`, rotated about its
/// own center by `angle_deg` degrees (counter-clockwise).
///
/// Vertices come out bottom-left, bottom-right, top-right, top-left. The
/// rotation is applied as translate-to-origin, rotate, translate-back; the
/// translations cancel at `angle_deg == 0` and corners are then exact.
///
/// Non-positive sizes are accepted and yield a degenerate or mirrored quad.
pub fn square(
    center: Vec2,
    size: f32,
    color: ColorRgba,
    tex_index: f32,
    angle_deg: f32,
) -> [Vertex; QUAD_VERTEX_COUNT] {
    let c = center.extend(0.0);
    let model = Mat4::from_translation(c)
        * Mat4::from_rotation_z(angle_deg.to_radians())
        * Mat4::from_translation(-c);

    let half = size / 2.0;
    let corners = [
        Vec3::new(center.x - half, center.y - half, 0.0),
        Vec3::new(center.x + half, center.y - half, 0.0),
        Vec3::new(center.x + half, center.y + half, 0.0),
        Vec3::new(center.x - half, center.y + half, 0.0),
    ];

    let color = color.to_array();
    std::array::from_fn(|i| Vertex {
        position: model.transform_point3(corners[i]).to_array(),
        color,
        tex_coords: QUAD_TEX_COORDS[i],
        tex_index,
    })
}

/// Index list for `quad_count` quads laid out back to back in one vertex buffer.
///
/// Quad `i` references only vertices `4i..4i+4`.
pub fn quad_indices(quad_count: usize) -> Vec<u32> {
    (0..quad_count)
        .flat_map(|q| {
            let base = (q * QUAD_VERTEX_COUNT) as u32;
            QUAD_INDICES.map(|i| base + i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn color() -> ColorRgba {
        ColorRgba::new(0.99, 0.85, 0.09, 1.0)
    }

    fn centroid(q: &[Vertex; 4]) -> Vec2 {
        let sum = q
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::new(v.position[0], v.position[1]));
        sum / 4.0
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_matches_struct_offsets() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 40);

        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(
            offsets,
            vec![
                std::mem::offset_of!(Vertex, position) as u64,
                std::mem::offset_of!(Vertex, color) as u64,
                std::mem::offset_of!(Vertex, tex_coords) as u64,
                std::mem::offset_of!(Vertex, tex_index) as u64,
            ]
        );

        let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2, 3]);
    }

    // ── square ────────────────────────────────────────────────────────────

    #[test]
    fn unrotated_square_has_exact_axis_aligned_corners() {
        for &(x, y, s) in &[(640.0, 360.0, 50.0), (426.67, 360.0, 50.0), (-3.5, 12.25, 7.0)] {
            let q = square(Vec2::new(x, y), s, color(), 0.0, 0.0);
            let h = s / 2.0;
            assert_eq!(q[0].position, [x - h, y - h, 0.0]);
            assert_eq!(q[1].position, [x + h, y - h, 0.0]);
            assert_eq!(q[2].position, [x + h, y + h, 0.0]);
            assert_eq!(q[3].position, [x - h, y + h, 0.0]);
        }
    }

    #[test]
    fn rotation_keeps_centroid() {
        let center = Vec2::new(640.0, 240.0);
        for angle in [0.0, 15.0, 45.0, 90.0, 133.3, 360.0, 1085.0, -30.0] {
            let q = square(center, 50.0, color(), 0.0, angle);
            let c = centroid(&q);
            assert!((c - center).length() < EPS, "angle {angle}: centroid {c:?}");
        }
    }

    #[test]
    fn quarter_turn_moves_bottom_left_to_bottom_right() {
        let q = square(Vec2::new(100.0, 100.0), 10.0, color(), 0.0, 90.0);
        // Counter-clockwise: the bottom-left corner (95, 95) lands at (105, 95).
        assert!((q[0].position[0] - 105.0).abs() < EPS);
        assert!((q[0].position[1] - 95.0).abs() < EPS);
    }

    #[test]
    fn full_turn_returns_to_original_orientation() {
        let center = Vec2::new(640.0, 240.0);
        let a = square(center, 50.0, color(), 0.0, 0.0);
        let b = square(center, 50.0, color(), 0.0, 360.0);
        for (va, vb) in a.iter().zip(b.iter()) {
            for k in 0..3 {
                assert!((va.position[k] - vb.position[k]).abs() < EPS);
            }
        }
    }

    #[test]
    fn tex_coords_independent_of_transform() {
        for angle in [0.0, 37.0, 270.0] {
            let q = square(Vec2::new(10.0, 20.0), 3.0, color(), 1.0, angle);
            let uvs: Vec<[f32; 2]> = q.iter().map(|v| v.tex_coords).collect();
            assert_eq!(uvs, QUAD_TEX_COORDS.to_vec());
        }
    }

    #[test]
    fn color_and_tex_index_copied_to_every_vertex() {
        let q = square(Vec2::ZERO, 1.0, color(), 2.0, 10.0);
        assert!(q.iter().all(|v| v.color == color().to_array() && v.tex_index == 2.0));
    }

    #[test]
    fn negative_size_mirrors_the_quad() {
        let q = square(Vec2::new(0.0, 0.0), -2.0, color(), 0.0, 0.0);
        assert_eq!(q[0].position, [1.0, 1.0, 0.0]);
        assert_eq!(q[2].position, [-1.0, -1.0, 0.0]);
    }

    // ── indices ───────────────────────────────────────────────────────────

    #[test]
    fn five_quads_use_thirty_indices() {
        let idx = quad_indices(5);
        assert_eq!(idx.len(), 30);
        assert_eq!(
            idx,
            vec![
                0, 1, 2, 2, 3, 0, //
                4, 5, 6, 6, 7, 4, //
                8, 9, 10, 10, 11, 8, //
                12, 13, 14, 14, 15, 12, //
                16, 17, 18, 18, 19, 16,
            ]
        );
    }

    #[test]
    fn each_quad_references_only_its_own_block() {
        for (q, chunk) in quad_indices(5).chunks(QUAD_INDEX_COUNT).enumerate() {
            let lo = (q * 4) as u32;
            assert!(chunk.iter().all(|&i| (lo..lo + 4).contains(&i)));
        }
    }

    #[test]
    fn zero_quads_yield_no_indices() {
        assert!(quad_indices(0).is_empty());
    }
}
