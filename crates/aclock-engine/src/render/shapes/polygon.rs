use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Mat4, Vec2};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{premul_alpha_blend, ProjectionUniform, ShapeVertex};

/// Unit primitive drawn by [`PolygonRenderer`].
///
/// Both shapes are one unit wide and one unit tall, with the base centered on
/// the origin and extending towards +Y, so a rotation about the origin pivots
/// them around the middle of their base.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Shape {
    Triangle,
    Quad,
}

const TRIANGLE: [Vec2; 3] = [
    Vec2::new(-0.5, 0.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.0, 1.0),
];

const QUAD: [Vec2; 4] = [
    Vec2::new(-0.5, 0.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.5, 1.0),
    Vec2::new(-0.5, 1.0),
];

impl Shape {
    /// Shape-space vertices in counter-clockwise order.
    pub fn vertices(self) -> &'static [Vec2] {
        match self {
            Shape::Triangle => &TRIANGLE,
            Shape::Quad => &QUAD,
        }
    }

    /// Index range of this shape inside the shared index buffer.
    fn index_range(self) -> Range<u32> {
        match self {
            Shape::Triangle => 0..3,
            Shape::Quad => 3..9,
        }
    }
}

// Triangle occupies vertices 0..3, quad 3..7.
const INDICES: [u16; 9] = [0, 1, 2, 3, 4, 5, 3, 5, 6];

fn shape_vertices() -> Vec<ShapeVertex> {
    TRIANGLE
        .iter()
        .chain(QUAD.iter())
        .map(|p| ShapeVertex { pos: [p.x, p.y] })
        .collect()
}

/// One shape placed with a model transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Polygon {
    pub shape: Shape,
    pub transform: Mat4,
    pub color: Color,
}

/// Instanced renderer for transformed unit shapes.
///
/// Every instance carries its own model matrix; the caller's projection is
/// shared through a uniform. Instances are drawn grouped by shape, triangles
/// first.
#[derive(Default)]
pub struct PolygonRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    shape_vbo: Option<wgpu::Buffer>,
    shape_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl PolygonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        projection: Mat4,
        polygons: &[Polygon],
    ) {
        let batches = batch_by_shape(polygons);
        if batches.instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_instance_capacity(ctx, batches.instances.len());
        self.write_projection_uniform(ctx, projection);

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&batches.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(shape_vbo) = self.shape_vbo.as_ref() else { return };
        let Some(shape_ibo) = self.shape_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("aclock polygon pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, shape_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(shape_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for (shape, range) in batches.ranges {
            rpass.draw_indexed(shape.index_range(), 0, range);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        log::debug!("building polygon pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("aclock polygon shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/polygon.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("aclock polygon bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(ProjectionUniform::min_binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("aclock polygon pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("aclock polygon pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ShapeVertex::layout(), PolygonInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // A mirrored transform flips winding; keep both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let projection_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("aclock polygon projection ubo"),
            size: std::mem::size_of::<ProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("aclock polygon bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_ubo.as_entire_binding(),
            }],
        });

        self.projection_ubo = Some(projection_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.shape_vbo.is_some() && self.shape_ibo.is_some() {
            return;
        }

        self.shape_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("aclock polygon shape vbo"),
            contents: bytemuck::cast_slice(&shape_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.shape_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("aclock polygon shape ibo"),
            contents: bytemuck::cast_slice(&INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_projection_uniform(&mut self, ctx: &RenderCtx<'_>, projection: Mat4) {
        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        let uniform = ProjectionUniform::new(projection);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        let new_size = (new_cap * std::mem::size_of::<PolygonInstance>()) as u64;
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("aclock polygon instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── batching ──────────────────────────────────────────────────────────────

struct Batches {
    instances: Vec<PolygonInstance>,
    ranges: Vec<(Shape, Range<u32>)>,
}

/// Packs instances contiguously per shape, preserving submission order within
/// a shape. Polygons with a non-finite transform are dropped.
fn batch_by_shape(polygons: &[Polygon]) -> Batches {
    let mut instances = Vec::with_capacity(polygons.len());
    let mut ranges = Vec::new();

    for shape in [Shape::Triangle, Shape::Quad] {
        let start = instances.len() as u32;
        instances.extend(
            polygons
                .iter()
                .filter(|p| p.shape == shape && p.transform.is_finite())
                .map(PolygonInstance::from),
        );
        let end = instances.len() as u32;
        if end > start {
            ranges.push((shape, start..end));
        }
    }

    Batches { instances, ranges }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (80 bytes):
///
///  offset  0  model   [[f32; 4]; 4]   loc 1..=4 (one column each)
///  offset 64  color   [f32; 4]        loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PolygonInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl From<&Polygon> for PolygonInstance {
    fn from(p: &Polygon) -> Self {
        Self {
            model: p.transform.cols,
            color: p.color.to_array(),
        }
    }
}

impl PolygonInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4, // model col 0
        2 => Float32x4, // model col 1
        3 => Float32x4, // model col 2
        4 => Float32x4, // model col 3
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PolygonInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
