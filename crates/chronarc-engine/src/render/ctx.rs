use crate::coords::Viewport;

/// GPU handles and frame geometry shared by every shape renderer.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Window size in logical pixels.
    pub viewport: Viewport,
    /// Physical pixels per logical pixel; feeds AA width and glyph rasterization.
    pub scale_factor: f32,
}

/// Encoder and swapchain view for the current frame. Passes load, never clear.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}
