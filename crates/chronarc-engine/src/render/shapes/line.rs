use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::SdfPipeline;

/// Renderer for `DrawCmd::Line`: capsule SDF, i.e. segments with round caps.
pub struct LineRenderer {
    pipeline: SdfPipeline<LineInstance>,
    instances: Vec<LineInstance>,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: SdfPipeline::new("line", include_str!("shaders/line.wgsl"), LineInstance::layout),
            instances: Vec::new(),
        }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Line(cmd) = &item.cmd else { continue };
            self.instances.push(LineInstance {
                p0: [cmd.from.x, cmd.from.y],
                p1: [cmd.to.x, cmd.to.y],
                half_width: cmd.stroke.width * 0.5,
                _pad: 0.0,
                color: cmd.stroke.color.to_array(),
            });
        }
        self.pipeline.draw(ctx, target, &self.instances);
    }
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  p0          [f32; 2]   loc 1
///  offset  8  p1          [f32; 2]   loc 2
///  offset 16  half_width   f32       loc 3
///  offset 20  _pad         f32
///  offset 24  color       [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    half_width: f32,
    _pad: f32,
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x2, offset: 0, shader_location: 1 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x2, offset: 8, shader_location: 2 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32, offset: 16, shader_location: 3 },
        wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x4, offset: 24, shader_location: 4 },
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_attribute_offset_skips_padding() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 40);
        assert_eq!(std::mem::offset_of!(LineInstance, color), 24);
        assert_eq!(LineInstance::ATTRS[3].offset, 24);
    }
}
