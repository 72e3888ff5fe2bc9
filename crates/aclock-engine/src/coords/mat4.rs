use core::ops::Mul;

use super::Vec2;

/// Column-major 4x4 transform.
///
/// Layout matches WGSL `mat4x4<f32>`, so the matrix can be uploaded to a
/// uniform or instance buffer with `bytemuck` as-is.
///
/// Products compose right to left: `(a * b).transform_point(p)` applies `b`
/// first, then `a`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Non-uniform scale in the XY plane.
    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    #[inline]
    pub const fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s)
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [tx, ty, 0.0, 1.0],
            ],
        }
    }

    /// Rotation about the Z axis, clockwise for positive `radians` with +Y up.
    ///
    /// `+Y` rotated by a quarter turn lands on `+X`, which is the direction a
    /// clock hand travels from 12 to 3.
    #[inline]
    pub fn rotation_cw(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Applies the transform to a point (`z = 0`, `w = 1`).
    ///
    /// Only the affine part is evaluated; every constructor here is affine.
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let c = &self.cols;
        Vec2::new(
            c[0][0] * p.x + c[1][0] * p.y + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[3][1],
        )
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.cols[k][i] * rhs.cols[j][k]).sum();
            }
        }
        Mat4 { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_point(p: Vec2, x: f32, y: f32) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-5);
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn identity_leaves_points_alone() {
        assert_point(Mat4::IDENTITY.transform_point(Vec2::new(0.3, -2.0)), 0.3, -2.0);
    }

    #[test]
    fn quarter_turn_moves_up_to_right() {
        let p = Mat4::rotation_cw(FRAC_PI_2).transform_point(Vec2::new(0.0, 1.0));
        assert_point(p, 1.0, 0.0);
    }

    #[test]
    fn half_turn_points_down() {
        let p = Mat4::rotation_cw(PI).transform_point(Vec2::new(0.0, 1.0));
        assert_point(p, 0.0, -1.0);
    }

    #[test]
    fn translation_offsets_points() {
        let p = Mat4::translation(1.0, -0.5).transform_point(Vec2::new(2.0, 2.0));
        assert_point(p, 3.0, 1.5);
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn product_applies_right_operand_first() {
        // scale then translate
        let m = Mat4::translation(1.0, 0.0) * Mat4::uniform_scale(2.0);
        assert_point(m.transform_point(Vec2::new(1.0, 1.0)), 3.0, 2.0);

        // translate then scale
        let m = Mat4::uniform_scale(2.0) * Mat4::translation(1.0, 0.0);
        assert_point(m.transform_point(Vec2::new(1.0, 1.0)), 4.0, 2.0);
    }

    #[test]
    fn identity_is_neutral_in_products() {
        let m = Mat4::rotation_cw(0.7) * Mat4::scale(2.0, 3.0);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = Mat4::rotation_cw(1.234).transform_point(Vec2::new(3.0, 4.0));
        assert_abs_diff_eq!(p.length(), 5.0, epsilon = 1e-5);
    }
}
