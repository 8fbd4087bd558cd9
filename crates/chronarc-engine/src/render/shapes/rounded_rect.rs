use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::shapes::RoundedRectCmd;
use crate::scene::{DrawCmd, DrawList};

use super::common::SdfPipeline;

/// Renderer for `DrawCmd::RoundedRect` (plain rectangles use zero radii).
pub struct RoundedRectRenderer {
    pipeline: SdfPipeline<RoundedRectInstance>,
    instances: Vec<RoundedRectInstance>,
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: SdfPipeline::new(
                "rounded rect",
                include_str!("shaders/rounded_rect.wgsl"),
                RoundedRectInstance::layout,
            ),
            instances: Vec::new(),
        }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.instances.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::RoundedRect(cmd) = &item.cmd else { continue };
            if let Some(inst) = RoundedRectInstance::from_cmd(cmd) {
                self.instances.push(inst);
            }
        }
        self.pipeline.draw(ctx, target, &self.instances);
    }
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (68 bytes):
///
///  offset  0  origin        [f32; 2]   loc 1
///  offset  8  size          [f32; 2]   loc 2
///  offset 16  radii         [f32; 4]   loc 3  (tl, tr, br, bl)
///  offset 32  fill          [f32; 4]   loc 4
///  offset 48  border        [f32; 4]   loc 5
///  offset 64  border_width   f32       loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radii: [f32; 4],
    fill: [f32; 4],
    border: [f32; 4],
    border_width: f32,
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // radii
        4 => Float32x4, // fill
        5 => Float32x4, // border
        6 => Float32    // border_width
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Normalizes the rect and clamps radii and border to half the short side.
    fn from_cmd(cmd: &RoundedRectCmd) -> Option<Self> {
        let rect = cmd.rect.normalized();
        if rect.is_empty() {
            return None;
        }
        let half_short = 0.5 * rect.size.x.min(rect.size.y);
        let (border_width, border) = match cmd.border {
            Some(b) => (b.width.clamp(0.0, half_short), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };
        Some(Self {
            origin: [rect.origin.x, rect.origin.y],
            size: [rect.size.x, rect.size.y],
            radii: cmd.radii.clamped(half_short).to_array(),
            fill: cmd.color.to_array(),
            border,
            border_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect};
    use crate::paint::Color;
    use crate::scene::shapes::Border;

    #[test]
    fn radii_and_border_are_clamped_to_half_short_side() {
        let cmd = RoundedRectCmd::new(
            Rect::new(0.0, 0.0, 40.0, 10.0),
            CornerRadii::all(30.0),
            Color::WHITE,
            Some(Border::new(50.0, Color::BLACK)),
        );
        let inst = RoundedRectInstance::from_cmd(&cmd).expect("instance");
        assert_eq!(inst.radii, [5.0; 4]);
        assert_eq!(inst.border_width, 5.0);
    }

    #[test]
    fn negative_size_is_normalized() {
        let cmd = RoundedRectCmd::new(Rect::new(10.0, 10.0, -4.0, -6.0), CornerRadii::all(0.0), Color::WHITE, None);
        let inst = RoundedRectInstance::from_cmd(&cmd).expect("instance");
        assert_eq!(inst.origin, [6.0, 4.0]);
        assert_eq!(inst.size, [4.0, 6.0]);
    }

    #[test]
    fn empty_rect_is_dropped() {
        let cmd = RoundedRectCmd::new(Rect::new(0.0, 0.0, 0.0, 5.0), CornerRadii::all(0.0), Color::WHITE, None);
        assert!(RoundedRectInstance::from_cmd(&cmd).is_none());
    }
}
