use super::Mat4;

/// Drawable size of the window.
///
/// Any consistent unit works (physical or logical pixels); only the ratio
/// between `width` and `height` feeds the projection.
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

    /// Orthographic projection from normalized drawing space to clip space.
    ///
    /// The shorter window axis spans [-1, 1]; the longer one is compressed so a
    /// unit of X covers as many pixels as a unit of Y. Invalid viewports
    /// (zero-sized, minimized windows) yield the identity.
    pub fn ortho_projection(self) -> Mat4 {
        if !self.is_valid() {
            return Mat4::IDENTITY;
        }

        if self.width >= self.height {
            Mat4::scale(self.height / self.width, 1.0)
        } else {
            Mat4::scale(1.0, self.width / self.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use approx::assert_relative_eq;

    /// Pixel length of a drawing-space vector after projection and the
    /// clip-space → pixel mapping (`[-1, 1]` spans the full window).
    fn pixel_len(vp: Viewport, v: Vec2) -> f32 {
        let clip = vp.ortho_projection().transform_point(v);
        Vec2::new(clip.x * vp.width * 0.5, clip.y * vp.height * 0.5).length()
    }

    #[test]
    fn square_viewport_is_identity() {
        assert_eq!(Viewport::new(500.0, 500.0).ortho_projection(), Mat4::IDENTITY);
    }

    #[test]
    fn unit_circle_stays_round() {
        let sizes = [
            (640.0, 480.0),
            (480.0, 640.0),
            (1.0, 1000.0),
            (1920.0, 1080.0),
            (3.0, 2.0),
        ];

        for (w, h) in sizes {
            let vp = Viewport::new(w, h);
            let r_x = pixel_len(vp, Vec2::new(1.0, 0.0));
            let r_y = pixel_len(vp, Vec2::new(0.0, 1.0));
            let r_d = pixel_len(vp, Vec2::new(0.6, 0.8));
            assert_relative_eq!(r_x, r_y, max_relative = 1e-5);
            assert_relative_eq!(r_x, r_d, max_relative = 1e-5);
        }
    }

    #[test]
    fn unit_circle_fills_shorter_axis() {
        let vp = Viewport::new(640.0, 480.0);
        assert_relative_eq!(pixel_len(vp, Vec2::new(0.0, 1.0)), 240.0, max_relative = 1e-5);

        let vp = Viewport::new(300.0, 900.0);
        assert_relative_eq!(pixel_len(vp, Vec2::new(1.0, 0.0)), 150.0, max_relative = 1e-5);
    }

    #[test]
    fn invalid_viewport_falls_back_to_identity() {
        assert!(!Viewport::new(0.0, 480.0).is_valid());
        assert_eq!(Viewport::new(0.0, 0.0).ortho_projection(), Mat4::IDENTITY);
        assert_eq!(Viewport::new(f32::NAN, 10.0).ortho_projection(), Mat4::IDENTITY);
    }
}
