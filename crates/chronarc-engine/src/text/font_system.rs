use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// Handle of the `index`-th font loaded into a system.
    ///
    /// Handles with no loaded font measure with fallback metrics and render nothing.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is owned by the application
/// and handed to the text renderer each frame so new glyphs can be rasterized
/// on demand.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Distance from the top of the line box to the baseline, in logical pixels.
    ///
    /// Falls back to `0.8 * size` for unknown fonts or fonts without
    /// horizontal metrics.
    #[must_use]
    pub fn ascent(&self, id: FontId, size: f32) -> f32 {
        self.get(id)
            .and_then(|font| font.horizontal_line_metrics(size))
            .map(|m| m.ascent)
            .unwrap_or(size * 0.8)
    }

    /// Computes the bounding box of a single line of text.
    ///
    /// Returns `(width, height)` in logical pixels. Width is the pen advance
    /// after the last glyph, height is at least `size`.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Pen position after each glyph rather than the bitmap's right edge, so
        // trailing spaces and italic overhangs are measured like the renderer lays out.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(size, f32::max);
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert!(fonts.is_empty());
    }

    #[test]
    fn unknown_font_uses_fallback_metrics() {
        let fonts = FontSystem::new();
        let id = FontId::from_index(3);
        assert!((fonts.ascent(id, 30.0) - 24.0).abs() < 1e-4);

        let size = fonts.measure_text("12:00:00", id, 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
    }
}
