use glam::{Mat4, Vec2};

/// Fixed viewport size in pixels.
///
/// Scene geometry is laid out against this size, independent of the
/// physical surface size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Orthographic projection mapping `[0, width] x [0, height]` (origin
    /// bottom-left) to clip space, with depth range `[-1, 1]`.
    pub fn ortho(self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, 0.0, self.height, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn vp() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    #[test]
    fn ortho_maps_corners_to_clip_space() {
        let m = vp().ortho();
        let bl = m.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let tr = m.project_point3(Vec3::new(1280.0, 720.0, 0.0));
        assert!((bl.x + 1.0).abs() < 1e-6 && (bl.y + 1.0).abs() < 1e-6);
        assert!((tr.x - 1.0).abs() < 1e-6 && (tr.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ortho_maps_center_to_origin() {
        let c = vp().center();
        let p = vp().ortho().project_point3(Vec3::new(c.x, c.y, 0.0));
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }

    #[test]
    fn validity() {
        assert!(vp().is_valid());
        assert!(!Viewport::new(0.0, 720.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 720.0).is_valid());
    }
}
