use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    create_quad_pipeline, create_viewport_ubo, draw_instanced_quads, viewport_layout_entry,
    write_viewport_ubo, InstanceBuffer, QuadBuffers,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for the glyph atlas. Pure bookkeeping; uploads happen in the renderer.
#[derive(Debug)]
struct ShelfPacker {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new() -> Self {
        Self { cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }

    /// Reserves a `w × h` slot and returns its top-left corner.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE || w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be rendered");
            self.full = true;
            return None;
        }
        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Maintains a 2048 × 2048 R8Unorm glyph atlas. Glyphs are rasterized at
/// physical size on first use via fontdue and cached for the renderer's
/// lifetime, keyed by `GlyphRasterConfig` (font, glyph, pixel size).
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    packer: ShelfPacker,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: QuadBuffers,
    instance_buffer: InstanceBuffer<GlyphInstance>,
    instances: Vec<GlyphInstance>,

    layout: Layout<()>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            packer: ShelfPacker::new(),
            glyph_cache: HashMap::new(),
            quad: QuadBuffers::default(),
            instance_buffer: InstanceBuffer::default(),
            instances: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        if !draw_list.items().iter().any(|it| matches!(it.cmd, DrawCmd::Text(_))) {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);
        self.ensure_bindings(ctx);
        self.quad.ensure(ctx, "text");

        let scale = if ctx.scale_factor > 0.0 { ctx.scale_factor } else { 1.0 };
        self.instances.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("unknown FontId {:?}, skipping text", cmd.font);
                continue;
            };
            let color = cmd.color.to_array();

            // Lay out in physical pixels, then map glyph boxes back to logical.
            self.layout.reset(&LayoutSettings {
                x: (cmd.origin.x * scale).round(),
                y: (cmd.origin.y * scale).round(),
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

            for g in self.layout.glyphs() {
                if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                    continue;
                }

                let cached = match self.glyph_cache.get(&g.key) {
                    Some(c) => *c,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(g.key);
                        let (w, h) = (metrics.width as u32, metrics.height as u32);
                        if w == 0 || h == 0 {
                            continue;
                        }
                        let Some(atlas) = self.atlas_texture.as_ref() else { continue };
                        let Some((gx, gy)) = self.packer.allocate(w, h) else { continue };
                        upload_glyph(ctx, atlas, &bitmap, gx, gy, w, h);

                        let atlas_f = ATLAS_SIZE as f32;
                        let entry = CachedGlyph {
                            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
                            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
                        };
                        self.glyph_cache.insert(g.key, entry);
                        entry
                    }
                };

                self.instances.push(GlyphInstance {
                    dst_min: [g.x / scale, g.y / scale],
                    dst_max: [(g.x + g.width as f32) / scale, (g.y + g.height as f32) / scale],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color,
                });
            }
        }

        if self.instances.is_empty() {
            return;
        }

        self.instance_buffer.upload(ctx, "text", &self.instances);

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        write_viewport_ubo(ctx, ubo);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        draw_instanced_quads(
            target,
            "text",
            pipeline,
            bind_group,
            &self.quad,
            &self.instance_buffer,
            self.instances.len() as u32,
        );
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("chronarc text bgl"),
            entries: &[
                viewport_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "text",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("chronarc text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.packer = ShelfPacker::new();
        self.glyph_cache.clear();
        self.bind_group = None;

        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("chronarc text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let viewport_ubo = create_viewport_ubo(ctx, "text");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("chronarc text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn upload_glyph(ctx: &RenderCtx<'_>, atlas: &wgpu::Texture, bitmap: &[u8], x: u32, y: u32, w: u32, h: u32) {
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: atlas,
            mip_level: 0,
            origin: wgpu::Origin3d { x, y, z: 0 },
            aspect: wgpu::TextureAspect::All,
        },
        bitmap,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(w),
            rows_per_image: Some(h),
        },
        wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
    );
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── shelf packer ─────────────────────────────────────────────────────

    #[test]
    fn packer_places_glyphs_left_to_right() {
        let mut p = ShelfPacker::new();
        assert_eq!(p.allocate(10, 12), Some((1, 1)));
        assert_eq!(p.allocate(8, 20), Some((12, 1)));
    }

    #[test]
    fn packer_wraps_to_next_shelf() {
        let mut p = ShelfPacker::new();
        p.allocate(ATLAS_SIZE - 20, 30).expect("first");
        let (x, y) = p.allocate(40, 10).expect("second");
        assert_eq!(x, GLYPH_PADDING);
        assert_eq!(y, GLYPH_PADDING + 30 + GLYPH_PADDING);
    }

    #[test]
    fn packer_reports_full_atlas() {
        let mut p = ShelfPacker::new();
        assert!(p.allocate(ATLAS_SIZE - 2, ATLAS_SIZE - 2).is_some());
        assert!(p.allocate(4, 4).is_none());
        assert!(p.full);
        assert!(p.allocate(1, 1).is_none());
    }
}
