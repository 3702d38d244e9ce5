//! Per-frame geometry of the five squares.

use glam::Vec2;

use squares_engine::coords::ColorRgba;
use squares_engine::render::{square, Vertex, QUAD_VERTEX_COUNT};

use crate::animation::Animation;
use crate::config::{QUAD_COUNT, SceneConfig};

/// Vertices uploaded every frame.
pub const VERTEX_COUNT: usize = QUAD_COUNT * QUAD_VERTEX_COUNT;

/// Texture unit per square. Index 2 has no unit bound and renders untextured.
const TEX_INDICES: [f32; QUAD_COUNT] = [0.0, 1.0, 2.0, 0.0, 0.0];

/// Builds all five squares in buffer order.
///
/// 0. center, panel fill color
/// 1. left third
/// 2. right third, untextured
/// 3. below center, rotating by the animation angle
/// 4. above center, moving horizontally
pub fn build_vertices(
    cfg: &SceneConfig,
    anim: &Animation,
    fill: ColorRgba,
) -> [Vertex; VERTEX_COUNT] {
    let (w, h) = (cfg.viewport.width, cfg.viewport.height);
    let [c1, c2, c3, c4] = cfg.quad_colors;

    let quads = [
        (cfg.viewport.center(), fill, 0.0),
        (Vec2::new(w / 3.0, h / 2.0), c1, 0.0),
        (Vec2::new(2.0 * w / 3.0, h / 2.0), c2, 0.0),
        (Vec2::new(w / 2.0, h / 3.0), c3, anim.angle()),
        (Vec2::new(anim.x(), 2.0 * h / 3.0), c4, 0.0),
    ];

    let mut out = [Vertex::default(); VERTEX_COUNT];
    for (i, (center, color, angle)) in quads.into_iter().enumerate() {
        let quad = square(center, cfg.square_size, color, TEX_INDICES[i], angle);
        out[i * QUAD_VERTEX_COUNT..(i + 1) * QUAD_VERTEX_COUNT].copy_from_slice(&quad);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn cfg() -> SceneConfig {
        SceneConfig::default()
    }

    fn anim(cfg: &SceneConfig) -> Animation {
        Animation::new(cfg.viewport.width / 2.0, cfg.bounce_bounds())
    }

    fn center_of(verts: &[Vertex], quad: usize) -> Vec2 {
        let block = &verts[quad * 4..quad * 4 + 4];
        block
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::new(v.position[0], v.position[1]))
            / 4.0
    }

    // ── layout ──────────────────────────────────────────────────────────

    #[test]
    fn squares_sit_at_their_anchors() {
        let cfg = cfg();
        let v = build_vertices(&cfg, &anim(&cfg), cfg.initial_fill);
        let expected = [
            Vec2::new(640.0, 360.0),
            Vec2::new(1280.0 / 3.0, 360.0),
            Vec2::new(2.0 * 1280.0 / 3.0, 360.0),
            Vec2::new(640.0, 240.0),
            Vec2::new(640.0, 480.0),
        ];
        for (i, e) in expected.iter().enumerate() {
            assert!(center_of(&v, i).distance(*e) < EPS, "quad {i}");
        }
    }

    #[test]
    fn colors_and_texture_indices() {
        let cfg = cfg();
        let fill = ColorRgba::new(1.0, 0.0, 0.5, 1.0);
        let v = build_vertices(&cfg, &anim(&cfg), fill);

        assert!(v[..4].iter().all(|x| x.color == fill.to_array()));
        for (q, c) in cfg.quad_colors.iter().enumerate() {
            let block = &v[(q + 1) * 4..(q + 2) * 4];
            assert!(block.iter().all(|x| x.color == c.to_array()), "quad {}", q + 1);
        }

        let idx: Vec<f32> = v.chunks(4).map(|q| q[0].tex_index).collect();
        assert_eq!(idx, TEX_INDICES);
        assert!(v.chunks(4).all(|q| q.iter().all(|x| x.tex_index == q[0].tex_index)));
    }

    // ── animation ───────────────────────────────────────────────────────

    #[test]
    fn static_squares_ignore_animation() {
        let cfg = cfg();
        let mut a = anim(&cfg);
        let before = build_vertices(&cfg, &a, cfg.initial_fill);
        for _ in 0..100 {
            a.advance(0.016, 400.0, 90.0);
        }
        let after = build_vertices(&cfg, &a, cfg.initial_fill);

        assert_eq!(before[..12], after[..12]);
    }

    #[test]
    fn zero_velocity_keeps_mover_in_place() {
        let cfg = cfg();
        let mut a = anim(&cfg);
        let x0 = center_of(&build_vertices(&cfg, &a, cfg.initial_fill), 4).x;
        for _ in 0..1000 {
            a.advance(0.016, 0.0, 180.0);
            let x = center_of(&build_vertices(&cfg, &a, cfg.initial_fill), 4).x;
            assert_eq!(x, x0);
        }
    }

    #[test]
    fn rotating_square_follows_angle() {
        let cfg = cfg();
        let mut a = anim(&cfg);
        a.advance(0.25, 0.0, 360.0);

        let v = build_vertices(&cfg, &a, cfg.initial_fill);
        let c = center_of(&v, 3);
        assert!(c.distance(Vec2::new(640.0, 240.0)) < EPS);

        // A quarter turn moves the bottom-left corner to bottom-right.
        let half = cfg.square_size / 2.0;
        assert!((v[12].position[0] - (640.0 + half)).abs() < EPS);
        assert!((v[12].position[1] - (240.0 - half)).abs() < EPS);
    }

    #[test]
    fn full_turn_restores_orientation() {
        let cfg = cfg();
        let mut a = anim(&cfg);
        let before = build_vertices(&cfg, &a, cfg.initial_fill);
        a.advance(1.0, 0.0, 360.0);
        let after = build_vertices(&cfg, &a, cfg.initial_fill);

        for (b, a) in before[12..16].iter().zip(&after[12..16]) {
            assert!((b.position[0] - a.position[0]).abs() < EPS);
            assert!((b.position[1] - a.position[1]).abs() < EPS);
        }
    }
}
