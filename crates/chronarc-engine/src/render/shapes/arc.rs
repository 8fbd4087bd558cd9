use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::ArcCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::SdfPipeline;

/// Renderer for `DrawCmd::Arc`.
///
/// Each arc is a quad covering its full circle; the fragment shader keeps the
/// pixels inside the angular span plus the round caps at both ends.
pub struct ArcRenderer {
    pipeline: SdfPipeline<ArcInstance>,
    instances: Vec<ArcInstance>,
}

impl ArcRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: SdfPipeline::new("arc", include_str!("shaders/arc.wgsl"), ArcInstance::layout),
            instances: Vec::new(),
        }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        self.instances.extend(draw_list.iter_in_paint_order().filter_map(|item| match &item.cmd {
            DrawCmd::Arc(cmd) => Some(ArcInstance::from_cmd(cmd)),
            _ => None,
        }));
        self.pipeline.draw(ctx, target, &self.instances);
    }
}

impl Default for ArcRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  center     [f32; 2]   loc 1
///  offset  8  radius_hw  [f32; 2]   loc 2  (.x = radius, .y = half stroke width)
///  offset 16  angles     [f32; 2]   loc 3  (.x = start, .y = sweep)
///  offset 24  color      [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ArcInstance {
    center: [f32; 2],
    radius_hw: [f32; 2],
    angles: [f32; 2],
    color: [f32; 4],
}

impl ArcInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_hw
        3 => Float32x2, // angles
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ArcInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &ArcCmd) -> Self {
        Self {
            center: [cmd.center.x, cmd.center.y],
            radius_hw: [cmd.radius, cmd.stroke.width * 0.5],
            angles: [cmd.start, cmd.sweep],
            color: cmd.stroke.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::shapes::Stroke;

    #[test]
    fn instance_carries_half_width_and_sweep() {
        let cmd = ArcCmd::with_sweep(Vec2::new(5.0, 6.0), 40.0, 0.0, 1.0, Stroke::new(4.0, Color::RED))
            .expect("arc");
        let inst = ArcInstance::from_cmd(&cmd);
        assert_eq!(inst.center, [5.0, 6.0]);
        assert_eq!(inst.radius_hw, [40.0, 2.0]);
        assert_eq!(inst.angles, [0.0, 1.0]);
        assert_eq!(inst.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn instance_stride_matches_attributes() {
        assert_eq!(std::mem::size_of::<ArcInstance>(), 40);
    }
}
