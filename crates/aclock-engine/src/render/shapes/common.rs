//! Shared GPU types and utilities used by shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::Mat4;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── projection uniform ────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ProjectionUniform {
    pub projection: [[f32; 4]; 4],
}

impl ProjectionUniform {
    pub(super) fn new(projection: Mat4) -> Self {
        Self {
            projection: projection.cols,
        }
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        // 64 bytes, never zero.
        std::num::NonZeroU64::MIN.saturating_add(std::mem::size_of::<Self>() as u64 - 1)
    }
}

// ── shape vertex ──────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ShapeVertex {
    pub pos: [f32; 2],
}

impl ShapeVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_uniform_is_one_mat4() {
        assert_eq!(std::mem::size_of::<ProjectionUniform>(), 64);
        assert_eq!(ProjectionUniform::min_binding_size().get(), 64);
    }

    #[test]
    fn projection_uniform_keeps_column_order() {
        let m = Mat4::translation(0.25, -0.5);
        let u = ProjectionUniform::new(m);
        assert_eq!(u.projection[3], [0.25, -0.5, 0.0, 1.0]);
    }
}
