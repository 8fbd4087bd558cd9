use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::SdfPipeline;

/// Renderer for `DrawCmd::Circle`.
///
/// Borders are rendered as an AA ring on the inside of the outer edge.
pub struct CircleRenderer {
    pipeline: SdfPipeline<CircleInstance>,
    instances: Vec<CircleInstance>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: SdfPipeline::new("circle", include_str!("shaders/circle.wgsl"), CircleInstance::layout),
            instances: Vec::new(),
        }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Circle(cmd) = &item.cmd else { continue };
            if cmd.radius <= 0.0 {
                continue;
            }
            let (border_width, border) = match cmd.border {
                Some(b) => (b.width.clamp(0.0, cmd.radius), b.color.to_array()),
                None => (0.0, [0.0; 4]),
            };
            self.instances.push(CircleInstance {
                center: [cmd.center.x, cmd.center.y],
                radius_bw: [cmd.radius, border_width],
                fill: cmd.color.to_array(),
                border,
            });
        }
        self.pipeline.draw(ctx, target, &self.instances);
    }
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  center     [f32; 2]   loc 1
///  offset  8  radius_bw  [f32; 2]   loc 2  (.x = radius, .y = border width)
///  offset 16  fill       [f32; 4]   loc 3
///  offset 32  border     [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_bw
        3 => Float32x4, // fill
        4 => Float32x4  // border
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
