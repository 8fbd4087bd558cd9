//! Shared GPU types and utilities used by all shape renderers.

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};

/// WGSL prepended to every shape shader: viewport uniform, NDC mapping and
/// the pixel coverage helper.
pub(super) const SHADER_PRELUDE: &str = include_str!("shaders/common.wgsl");

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    /// Physical pixels per logical pixel; scales SDF distances for AA.
    pub scale: f32,
    pub _pad: f32,
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport, scale: f32) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
            _pad: 0.0,
        }
    }
}

pub(super) fn viewport_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("chronarc {label} viewport ubo")),
        size: std::mem::size_of::<ViewportUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    let uniform = ViewportUniform::new(ctx.viewport, ctx.scale_factor);
    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers, created on first use.
#[derive(Default)]
pub(super) struct QuadBuffers {
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl QuadBuffers {
    pub(super) fn ensure(&mut self, ctx: &RenderCtx<'_>, label: &str) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }
        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("chronarc {label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("chronarc {label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn get(&self) -> Option<(&wgpu::Buffer, &wgpu::Buffer)> {
        Some((self.vbo.as_ref()?, self.ibo.as_ref()?))
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer (power-of-two capacity, min 64).
pub(super) struct InstanceBuffer<I> {
    vbo: Option<wgpu::Buffer>,
    capacity: usize,
    _marker: PhantomData<I>,
}

impl<I> Default for InstanceBuffer<I> {
    fn default() -> Self {
        Self { vbo: None, capacity: 0, _marker: PhantomData }
    }
}

impl<I: Pod> InstanceBuffer<I> {
    /// Uploads `instances`, growing the buffer when needed.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, label: &str, instances: &[I]) {
        if instances.len() > self.capacity || self.vbo.is_none() {
            let new_cap = instances.len().next_power_of_two().max(64);
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("chronarc {label} instance vbo")),
                size: (new_cap * std::mem::size_of::<I>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
        }
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(instances));
        }
    }

    fn get(&self) -> Option<&wgpu::Buffer> {
        self.vbo.as_ref()
    }
}

// ── pipeline + pass ───────────────────────────────────────────────────────

/// Builds an instanced quad pipeline drawing into the surface format with
/// premultiplied alpha blending. `shader_body` is appended to the prelude.
pub(super) fn create_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_body: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("chronarc {label} shader")),
        source: wgpu::ShaderSource::Wgsl(format!("{SHADER_PRELUDE}\n{shader_body}").into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("chronarc {label} pipeline layout")),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("chronarc {label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
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
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Records one instanced quad draw in its own render pass, loading the
/// existing target contents.
pub(super) fn draw_instanced_quads<I: Pod>(
    target: &mut RenderTarget<'_>,
    label: &str,
    pipeline: &wgpu::RenderPipeline,
    bind_group: &wgpu::BindGroup,
    quad: &QuadBuffers,
    instances: &InstanceBuffer<I>,
    count: u32,
) {
    let Some((quad_vbo, quad_ibo)) = quad.get() else { return };
    let Some(instance_vbo) = instances.get() else { return };

    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(&format!("chronarc {label} pass")),
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
    rpass.set_vertex_buffer(0, quad_vbo.slice(..));
    rpass.set_vertex_buffer(1, instance_vbo.slice(..));
    rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
    rpass.draw_indexed(0..6, 0, 0..count);
}

// ── SDF shape pipeline ────────────────────────────────────────────────────

/// GPU state for an instanced SDF shape whose only binding is the viewport
/// uniform. Arc, line, rounded rect and circle renderers wrap one each and
/// only differ in their instance type and shader.
pub(super) struct SdfPipeline<I> {
    label: &'static str,
    shader_body: &'static str,
    instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: QuadBuffers,
    instances: InstanceBuffer<I>,
}

impl<I: Pod> SdfPipeline<I> {
    pub(super) fn new(
        label: &'static str,
        shader_body: &'static str,
        instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,
    ) -> Self {
        Self {
            label,
            shader_body,
            instance_layout,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: QuadBuffers::default(),
            instances: InstanceBuffer::default(),
        }
    }

    /// Uploads `instances` and draws them in one pass. No-op when empty.
    pub(super) fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, instances: &[I]) {
        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.quad.ensure(ctx, self.label);
        self.instances.upload(ctx, self.label, instances);

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        write_viewport_ubo(ctx, ubo);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        draw_instanced_quads(
            target,
            self.label,
            pipeline,
            bind_group,
            &self.quad,
            &self.instances,
            instances.len() as u32,
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("chronarc {} bgl", self.label)),
            entries: &[viewport_layout_entry()],
        });
        let pipeline =
            create_quad_pipeline(ctx, self.label, self.shader_body, &bgl, (self.instance_layout)());

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = create_viewport_ubo(ctx, self.label);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("chronarc {} bind group", self.label)),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
    }

    #[test]
    fn viewport_uniform_sanitizes_inputs() {
        let u = ViewportUniform::new(Viewport::new(0.0, 480.0), f32::NAN);
        assert_eq!(u.viewport, [1.0, 480.0]);
        assert_eq!(u.scale, 1.0);
    }

    #[test]
    fn quad_indices_cover_two_triangles() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }
}
