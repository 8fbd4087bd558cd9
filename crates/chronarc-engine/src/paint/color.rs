use std::fmt;

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}': expected #rgb, #rrggbb or #rrggbbaa", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::from_premul(1.0, 0.0, 0.0, 1.0);
    /// CSS `green` (#008000).
    pub const GREEN: Color = Color::from_premul(0.0, 0.215_860_5, 0.0, 1.0);
    pub const BLUE: Color = Color::from_premul(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    ///
    /// RGB is decoded to linear; alpha is already linear.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let lin = |v: u8| srgb_to_linear(f32::from(v) / 255.0);
        Self::from_straight(lin(r), lin(g), lin(b), f32::from(a) / 255.0)
    }

    /// Parses a CSS-style hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Self::from_srgb_u8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            6 => Ok(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }

    /// Returns straight-alpha sRGB bytes `[r, g, b, a]`.
    pub fn to_srgb_u8(self) -> [u8; 4] {
        let (r, g, b, a) = self.to_straight();
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let enc = |v: f32| q(linear_to_srgb(v.clamp(0.0, 1.0)));
        [enc(r), enc(g), enc(b), q(a)]
    }

    /// Formats the color as `#rrggbb` (alpha dropped).
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_srgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// sRGB transfer function, encoded `[0, 1]` to linear.
fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f32) -> f32 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── from_hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_white() {
        assert_eq!(Color::from_hex("#ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn hex_short_form_expands() {
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::RED);
    }

    #[test]
    fn hex_without_hash() {
        assert_eq!(Color::from_hex("0000ff").unwrap(), Color::BLUE);
    }

    #[test]
    fn hex_with_alpha_is_premultiplied() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
    }

    // ── to_hex ────────────────────────────────────────────────────────────

    #[test]
    fn to_hex_inverts_from_hex() {
        assert_eq!(Color::from_hex("#3a7bd5").unwrap().to_hex(), "#3a7bd5");
    }

    // ── sRGB ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_is_decoded_to_linear() {
        let green = Color::from_hex("#008000").unwrap();
        assert!((green.g - 0.215_86).abs() < 1e-4, "g = {}", green.g);
        let grey = Color::from_hex("#808080").unwrap();
        assert!((grey.r - 0.215_86).abs() < 1e-4, "r = {}", grey.r);
    }

    #[test]
    fn green_matches_css_green() {
        let parsed = Color::from_hex("#008000").unwrap();
        assert!((Color::GREEN.g - parsed.g).abs() < 1e-6);
        assert_eq!(Color::GREEN.to_hex(), "#008000");
    }

    #[test]
    fn every_byte_survives_round_trip() {
        for v in 0..=255u8 {
            let c = Color::from_srgb_u8(v, v, v, 255);
            assert_eq!(c.to_srgb_u8(), [v, v, v, 255], "byte {v}");
        }
    }
}
