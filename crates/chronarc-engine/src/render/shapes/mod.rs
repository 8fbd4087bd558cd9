//! Shape renderers.
//!
//! One instanced pass per shape kind. [`SceneRenderer`] runs them in a fixed
//! order (arcs, lines, rounded rects, circles, text); within a kind, items are
//! drawn in draw-list paint order.

mod common;

pub mod arc;
pub mod circle;
pub mod line;
pub mod rounded_rect;
pub mod text;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

pub use arc::ArcRenderer;
pub use circle::CircleRenderer;
pub use line::LineRenderer;
pub use rounded_rect::RoundedRectRenderer;
pub use text::TextRenderer;

/// All shape renderers bundled in pass order.
pub struct SceneRenderer {
    pub arcs: ArcRenderer,
    pub lines: LineRenderer,
    pub rounded_rects: RoundedRectRenderer,
    pub circles: CircleRenderer,
    pub text: TextRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            arcs: ArcRenderer::new(),
            lines: LineRenderer::new(),
            rounded_rects: RoundedRectRenderer::new(),
            circles: CircleRenderer::new(),
            text: TextRenderer::new(),
        }
    }

    /// Draws every command in `draw_list` into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.arcs.render(ctx, target, draw_list);
        self.lines.render(ctx, target, draw_list);
        self.rounded_rects.render(ctx, target, draw_list);
        self.circles.render(ctx, target, draw_list);
        self.text.render(ctx, target, draw_list, fonts);
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}
