use std::fmt;

use thiserror::Error;

use crate::math::lerp;

/// Errors produced at the color construction/compositing boundary.
///
/// None of these are recoverable inside the function that detects them; they
/// surface to the caller instead of silently substituting a default color.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    /// Hex colors must be exactly `#RRGGBB` (7 ASCII characters).
    #[error("invalid hex color {input:?}: expected \"#RRGGBB\"")]
    InvalidHex { input: String },

    /// Raw float input shorter than one full RGBA quadruple.
    #[error("color slice has {len} floats, need at least 4")]
    SliceTooShort { len: usize },

    /// Porter-Duff "over" produced a combined alpha of zero, which cannot be
    /// normalized.
    #[error("alpha blend yields zero combined alpha")]
    ZeroCombinedAlpha,
}

/// RGBA color with `f32` channels, nominally in `[0, 1]`.
///
/// Channels are stored verbatim: construction does not clamp, and equality is
/// exact per-channel comparison. Out-of-range values are left for the GPU
/// boundary to clamp.
///
/// `Color` is an immutable value; the `with_*` and tone functions return new
/// instances.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// ── constants ─────────────────────────────────────────────────────────────

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    pub const GRAY_DARK: Self = Self::splat(0.25, 1.0);
    pub const GRAY: Self = Self::splat(0.5, 1.0);
    pub const GRAY_LIGHT: Self = Self::splat(0.75, 1.0);
}

// ── construction ──────────────────────────────────────────────────────────

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels (alpha 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Greyscale color: the same value on all three RGB channels.
    #[inline]
    pub const fn splat(v: f32, a: f32) -> Self {
        Self::new(v, v, v, a)
    }

    /// Unpacks a 32-bit ARGB integer (alpha in the highest byte) into
    /// byte-normalized channels.
    pub fn from_u32(argb: u32) -> Self {
        Self::from_bytes(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    /// Each byte divided by 255.
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parses a `#RRGGBB` string. Alpha is forced to 1.0.
    ///
    /// Only the exact 7-character form is accepted; anything else is
    /// [`ColorError::InvalidHex`].
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex { input: hex.to_owned() };

        if hex.len() != 7 || !hex.is_ascii() || !hex.starts_with('#') {
            return Err(invalid());
        }

        let byte = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
        let r = byte(1..3)?;
        let g = byte(3..5)?;
        let b = byte(5..7)?;

        Ok(Self::from_bytes(r, g, b, 255))
    }

    /// Reads one RGBA quadruple from the front of a float slice.
    ///
    /// Fails with [`ColorError::SliceTooShort`] when fewer than four floats
    /// are available.
    pub fn from_slice(values: &[f32]) -> Result<Self, ColorError> {
        match values {
            [r, g, b, a, ..] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(ColorError::SliceTooShort { len: values.len() }),
        }
    }
}

// ── conversion ────────────────────────────────────────────────────────────

impl Color {
    /// Packs into a 32-bit ARGB integer (alpha in the highest byte).
    ///
    /// Channels quantize by truncation (`floor(c * 255)`), so the round-trip
    /// through [`Color::from_u32`] is lossy by up to 1/255 per channel.
    pub fn to_u32(self) -> u32 {
        let [r, g, b, a] = self.to_array().map(channel_to_byte);
        u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
    }

    /// Packs into 32-bit ABGR, the byte order some packed-pixel consumers
    /// (e.g. immediate-mode GUI vertex streams) expect.
    pub fn to_u32_abgr(self) -> u32 {
        let [r, g, b, a] = self.to_array().map(channel_to_byte);
        u32::from(a) << 24 | u32::from(b) << 16 | u32::from(g) << 8 | u32::from(r)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Renders as `#rrggbb` (lowercase, zero-padded). Alpha is dropped.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_array().map(channel_to_byte);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
fn channel_to_byte(v: f32) -> u8 {
    // `as` saturates, so out-of-range channels land on 0 or 255.
    (v * 255.0) as u8
}

// ── derived colors ────────────────────────────────────────────────────────

impl Color {
    #[inline]
    #[must_use]
    pub fn with_red(self, r: f32) -> Self {
        Self { r, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_green(self, g: f32) -> Self {
        Self { g, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_blue(self, b: f32) -> Self {
        Self { b, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scales RGB by `factor` (clamped to >= 0), capping each product at 1.
    ///
    /// There is no lower clamp after the multiply, so negative channels stay
    /// negative. Alpha is untouched.
    #[must_use]
    pub fn brightness(self, factor: f32) -> Self {
        let factor = factor.max(0.0);
        Self::new(
            (self.r * factor).min(1.0),
            (self.g * factor).min(1.0),
            (self.b * factor).min(1.0),
            self.a,
        )
    }

    /// Replaces RGB with the perceptual luminance, preserving alpha.
    #[must_use]
    pub fn greyscale(self) -> Self {
        Self::splat(self.luminance(), self.a)
    }

    /// Relative luminance: sRGB channels linearized, then combined with the
    /// ITU-R BT.709 weights.
    pub fn luminance(self) -> f32 {
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// Multiplies HSV saturation by `factor`, capped at 1.
    #[must_use]
    pub fn saturate(self, factor: f32) -> Self {
        let (h, s, v) = self.to_hsv();
        Self::from_hsv(h, (s * factor).min(1.0), v, self.a)
    }

    /// Divides HSV saturation by `factor`, clamped into [0, 1].
    ///
    /// `factor` must be positive; factors above 1 desaturate, factors in
    /// (0, 1) increase saturation (mirroring [`Color::saturate`]).
    #[must_use]
    pub fn desaturate(self, factor: f32) -> Self {
        let (h, s, v) = self.to_hsv();
        Self::from_hsv(h, (s / factor).clamp(0.0, 1.0), v, self.a)
    }
}

/// sRGB transfer function, forward direction (gamma-encoded to linear).
fn linearize(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

// ── HSV ───────────────────────────────────────────────────────────────────

/// Below this channel spread a color counts as achromatic and hue is
/// reported as 0.
const HUE_EPSILON: f32 = 1e-5;

impl Color {
    /// Converts to `(hue, saturation, value)`, each normalized to [0, 1].
    ///
    /// Hue is undefined for achromatic colors and reported as 0.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta / max } else { 0.0 };

        if delta < HUE_EPSILON {
            return (0.0, s, v);
        }

        let mut h = if self.r >= max {
            (self.g - self.b) / delta
        } else if self.g >= max {
            2.0 + (self.b - self.r) / delta
        } else {
            4.0 + (self.r - self.g) / delta
        };

        // Six sectors of 60 degrees, normalized to [0, 1].
        h /= 6.0;
        if h < 0.0 {
            h += 1.0;
        }

        (h, s, v)
    }

    /// Inverse of [`Color::to_hsv`]: hue wraps into [0, 1), saturation <= 0
    /// yields a greyscale color at `v`.
    pub fn from_hsv(h: f32, s: f32, v: f32, a: f32) -> Self {
        if s <= 0.0 {
            return Self::splat(v, a);
        }

        let h = h.rem_euclid(1.0) * 6.0;
        let sector = h as u32; // 0..=5
        let f = h - sector as f32;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(r, g, b, a)
    }
}

// ── compositing ───────────────────────────────────────────────────────────

impl Color {
    /// Porter-Duff "over": composites `fg` on top of `bg` (straight alpha).
    ///
    /// Fast paths: a fully transparent foreground returns `bg` unchanged
    /// (exact equality), and an opaque background reduces to an RGB lerp by
    /// `fg.a` with alpha exactly 1. The general branch fails with
    /// [`ColorError::ZeroCombinedAlpha`] when the combined alpha is zero
    /// (only reachable with out-of-range inputs) instead of dividing by it.
    pub fn alpha_blend(fg: Color, bg: Color) -> Result<Color, ColorError> {
        let alpha = fg.a;
        if alpha == 0.0 {
            return Ok(bg);
        }

        if bg.a == 1.0 {
            return Ok(Color::new(
                lerp(bg.r, fg.r, alpha),
                lerp(bg.g, fg.g, alpha),
                lerp(bg.b, fg.b, alpha),
                1.0,
            ));
        }

        let inv = 1.0 - alpha;
        let out_alpha = alpha + bg.a * inv;
        if out_alpha == 0.0 {
            return Err(ColorError::ZeroCombinedAlpha);
        }

        Ok(Color::new(
            (fg.r * alpha + bg.r * bg.a * inv) / out_alpha,
            (fg.g * alpha + bg.g * bg.a * inv) / out_alpha,
            (fg.b * alpha + bg.b * bg.a * inv) / out_alpha,
            out_alpha,
        ))
    }

    /// Per-channel linear interpolation, alpha included.
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        Color::new(
            lerp(a.r, b.r, t),
            lerp(a.g, b.g, t),
            lerp(a.b, b.b, t),
            lerp(a.a, b.a, t),
        )
    }

    pub fn multiply(a: Color, b: Color) -> Color {
        Color::new(a.r * b.r, a.g * b.g, a.b * b.b, a.a * b.a)
    }

    pub fn screen(a: Color, b: Color) -> Color {
        Color::new(
            1.0 - (1.0 - a.r) * (1.0 - b.r),
            1.0 - (1.0 - a.g) * (1.0 - b.g),
            1.0 - (1.0 - a.b) * (1.0 - b.b),
            a.a * b.a,
        )
    }

    /// Multiplies dark base channels, screens light ones.
    pub fn overlay(a: Color, b: Color) -> Color {
        fn channel(a: f32, b: f32) -> f32 {
            if a < 0.5 {
                2.0 * a * b
            } else {
                1.0 - 2.0 * (1.0 - a) * (1.0 - b)
            }
        }

        Color::new(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
            a.a * b.a,
        )
    }

    /// Overlay with the arguments swapped.
    pub fn hard_light(a: Color, b: Color) -> Color {
        Color::overlay(b, a)
    }

    pub fn soft_light(a: Color, b: Color) -> Color {
        fn channel(a: f32, b: f32) -> f32 {
            if b < 0.5 {
                a - (1.0 - 2.0 * b) * a * (1.0 - a)
            } else {
                let d = if a < 0.25 {
                    ((16.0 * a - 12.0) * a + 4.0) * a
                } else {
                    a.sqrt()
                };
                a + (2.0 * b - 1.0) * (d - a)
            }
        }

        Color::new(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
            a.a * b.a,
        )
    }

    /// Brightens `a` by `b`; a full-intensity divisor channel yields 1.
    pub fn color_dodge(a: Color, b: Color) -> Color {
        fn channel(a: f32, b: f32) -> f32 {
            if b == 1.0 { 1.0 } else { (a / (1.0 - b)).min(1.0) }
        }

        Color::new(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
            a.a * b.a,
        )
    }

    /// Darkens `a` by `b`; a zero divisor channel yields 0.
    pub fn color_burn(a: Color, b: Color) -> Color {
        fn channel(a: f32, b: f32) -> f32 {
            if b == 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - a) / b).min(1.0)
            }
        }

        Color::new(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
            a.a * b.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Color, b: Color, eps: f32) {
        assert!(
            (a.r - b.r).abs() < eps
                && (a.g - b.g).abs() < eps
                && (a.b - b.b).abs() < eps
                && (a.a - b.a).abs() < eps,
            "{a:?} != {b:?}"
        );
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rgb_defaults_alpha_to_opaque() {
        let c = Color::rgb(0.2, 0.4, 0.6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn splat_is_greyscale() {
        let c = Color::splat(0.3, 0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (0.3, 0.3, 0.3, 0.5));
    }

    #[test]
    fn from_u32_unpacks_argb() {
        let c = Color::from_u32(0xFF_80_00_FF);
        assert_close(c, Color::new(0.502, 0.0, 1.0, 1.0), 0.005);
    }

    #[test]
    fn from_bytes_normalizes() {
        let c = Color::from_bytes(255, 0, 0, 255);
        assert_eq!(c, Color::RED);
    }

    #[test]
    fn from_slice_reads_first_quadruple() {
        let c = Color::from_slice(&[0.1, 0.2, 0.3, 0.4, 9.0]).unwrap();
        assert_eq!(c, Color::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn from_slice_rejects_short_input() {
        assert_eq!(
            Color::from_slice(&[0.1, 0.2, 0.3]),
            Err(ColorError::SliceTooShort { len: 3 })
        );
    }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn from_hex_parses_rrggbb() {
        let c = Color::from_hex("#FF0000").unwrap();
        assert_close(c, Color::RED, 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(matches!(
            Color::from_hex("#ff00"),
            Err(ColorError::InvalidHex { .. })
        ));
        assert!(matches!(
            Color::from_hex("#ff000000"),
            Err(ColorError::InvalidHex { .. })
        ));
    }

    #[test]
    fn from_hex_rejects_missing_prefix_and_bad_digits() {
        assert!(Color::from_hex("0xff000").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
    }

    #[test]
    fn to_hex_is_lowercase_and_drops_alpha() {
        assert_eq!(Color::RED.with_alpha(0.5).to_hex(), "#ff0000");
        assert_eq!(Color::new(0.0, 0.0, 0.0, 1.0).to_hex(), "#000000");
    }

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#3a7f1c").unwrap();
        assert_eq!(c.to_hex(), "#3a7f1c");
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn to_u32_packs_argb() {
        assert_eq!(Color::RED.to_u32(), 0xFF_FF_00_00);
        assert_eq!(Color::BLUE.to_u32(), 0xFF_00_00_FF);
    }

    #[test]
    fn to_u32_abgr_swaps_red_and_blue() {
        assert_eq!(Color::RED.to_u32_abgr(), 0xFF_00_00_FF);
        assert_eq!(Color::BLUE.to_u32_abgr(), 0xFF_FF_00_00);
    }

    #[test]
    fn u32_round_trip_within_byte_quantization() {
        let colors = [
            Color::new(0.9, 0.1, 0.4, 0.7),
            Color::GRAY,
            Color::new(0.123, 0.456, 0.789, 1.0),
        ];
        for original in colors {
            let restored = Color::from_u32(original.to_u32());
            assert_close(original, restored, 1.0 / 255.0 + 1e-6);
        }
    }

    // ── equality ──────────────────────────────────────────────────────────

    #[test]
    fn equality_is_exact() {
        assert_eq!(Color::GRAY, Color::splat(0.5, 1.0));
        assert_ne!(Color::GRAY, Color::splat(0.5 + f32::EPSILON, 1.0));
    }

    // ── derived colors ────────────────────────────────────────────────────

    #[test]
    fn with_channel_replaces_one_channel() {
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.with_red(0.9), Color::new(0.9, 0.2, 0.3, 0.4));
        assert_eq!(c.with_green(0.9), Color::new(0.1, 0.9, 0.3, 0.4));
        assert_eq!(c.with_blue(0.9), Color::new(0.1, 0.2, 0.9, 0.4));
        assert_eq!(c.with_alpha(0.9), Color::new(0.1, 0.2, 0.3, 0.9));
    }

    #[test]
    fn brightness_zero_blacks_out_rgb_only() {
        let c = Color::new(0.8, 0.6, 0.4, 0.5).brightness(0.0);
        assert_eq!(c, Color::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn brightness_clamps_at_one() {
        let c = Color::new(0.5, 0.5, 0.5, 1.0).brightness(2.0);
        assert_eq!(c, Color::WHITE);
    }

    #[test]
    fn brightness_negative_factor_is_treated_as_zero() {
        let c = Color::GRAY.brightness(-3.0);
        assert_eq!((c.r, c.g, c.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn luminance_of_extremes() {
        assert!(Color::BLACK.luminance().abs() < 1e-6);
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-4);
        // Green dominates perceptual luminance.
        assert!(Color::GREEN.luminance() > Color::RED.luminance());
        assert!(Color::RED.luminance() > Color::BLUE.luminance());
    }

    #[test]
    fn greyscale_flattens_rgb_and_keeps_alpha() {
        let c = Color::new(0.9, 0.2, 0.4, 0.6).greyscale();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert_eq!(c.a, 0.6);
    }

    #[test]
    fn saturate_caps_at_full_saturation() {
        let c = Color::RED.saturate(5.0);
        let (_, s, _) = c.to_hsv();
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn desaturate_divides_saturation() {
        let c = Color::RED.desaturate(2.0);
        let (h, s, _) = c.to_hsv();
        assert!((s - 0.5).abs() < 1e-5);
        assert!(h.abs() < 1e-5);
    }

    // ── HSV ───────────────────────────────────────────────────────────────

    #[test]
    fn to_hsv_of_primaries() {
        let (h, s, v) = Color::RED.to_hsv();
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));

        let (h, s, v) = Color::GREEN.to_hsv();
        assert!((h - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!((s, v), (1.0, 1.0));

        let (h, s, v) = Color::BLUE.to_hsv();
        assert!((h - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!((s, v), (1.0, 1.0));
    }

    #[test]
    fn to_hsv_achromatic_reports_zero_hue() {
        let (h, s, v) = Color::GRAY.to_hsv();
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.5);
    }

    #[test]
    fn hsv_round_trip_chromatic() {
        let colors = [
            Color::RED,
            Color::YELLOW,
            Color::CYAN,
            Color::new(0.8, 0.3, 0.1, 1.0),
            Color::new(0.2, 0.5, 0.9, 0.7),
        ];
        for original in colors {
            let (h, s, v) = original.to_hsv();
            let restored = Color::from_hsv(h, s, v, original.a);
            assert_close(original, restored, 1e-4);
        }
    }

    #[test]
    fn hsv_round_trip_achromatic_preserves_rgb() {
        let (h, s, v) = Color::GRAY_LIGHT.to_hsv();
        let restored = Color::from_hsv(h, s, v, 1.0);
        assert_eq!(restored, Color::GRAY_LIGHT);
    }

    #[test]
    fn from_hsv_wraps_hue() {
        assert_close(Color::from_hsv(1.5, 1.0, 1.0, 1.0), Color::CYAN, 1e-5);
        assert_close(Color::from_hsv(-0.5, 1.0, 1.0, 1.0), Color::CYAN, 1e-5);
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn alpha_blend_transparent_foreground_returns_background() {
        let bg = Color::new(0.3, 0.6, 0.9, 0.4);
        let fg = Color::RED.with_alpha(0.0);
        assert_eq!(Color::alpha_blend(fg, bg).unwrap(), bg);
    }

    #[test]
    fn alpha_blend_opaque_background_is_a_lerp() {
        let fg = Color::new(1.0, 0.0, 0.0, 0.25);
        let bg = Color::new(0.0, 0.0, 1.0, 1.0);
        let out = Color::alpha_blend(fg, bg).unwrap();
        let expected = Color::lerp(bg, fg, fg.a);
        assert_close(out, expected.with_alpha(1.0), 1e-6);
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn alpha_blend_general_branch_combines_alpha() {
        let fg = Color::new(1.0, 0.0, 0.0, 0.5);
        let bg = Color::new(0.0, 0.0, 1.0, 0.5);
        let out = Color::alpha_blend(fg, bg).unwrap();
        assert!((out.a - 0.75).abs() < 1e-6);
        assert!(out.r > out.b); // foreground dominates
    }

    #[test]
    fn alpha_blend_zero_combined_alpha_is_an_error() {
        // Only reachable with out-of-range alpha inputs.
        let fg = Color::new(1.0, 0.0, 0.0, -1.0);
        let bg = Color::new(0.0, 0.0, 1.0, 0.5);
        assert_eq!(
            Color::alpha_blend(fg, bg),
            Err(ColorError::ZeroCombinedAlpha)
        );
    }

    #[test]
    fn lerp_interpolates_all_channels() {
        let mid = Color::lerp(Color::TRANSPARENT, Color::WHITE, 0.5);
        assert_eq!(mid, Color::splat(0.5, 0.5));
    }

    #[test]
    fn multiply_by_white_is_identity() {
        let c = Color::new(0.3, 0.6, 0.9, 1.0);
        assert_eq!(Color::multiply(c, Color::WHITE), c);
    }

    #[test]
    fn screen_with_black_is_identity() {
        let c = Color::new(0.3, 0.6, 0.9, 1.0);
        assert_close(Color::screen(c, Color::BLACK), c, 1e-6);
    }

    #[test]
    fn overlay_splits_at_half() {
        // Dark base multiplies, light base screens.
        let dark = Color::overlay(Color::splat(0.25, 1.0), Color::GRAY);
        assert!((dark.r - 0.25).abs() < 1e-6);
        let light = Color::overlay(Color::splat(0.75, 1.0), Color::GRAY);
        assert!((light.r - 0.75).abs() < 1e-6);
    }

    #[test]
    fn hard_light_is_overlay_swapped() {
        let a = Color::new(0.3, 0.6, 0.9, 1.0);
        let b = Color::new(0.8, 0.2, 0.5, 1.0);
        assert_eq!(Color::hard_light(a, b), Color::overlay(b, a));
    }

    #[test]
    fn color_dodge_guards_full_divisor() {
        let out = Color::color_dodge(Color::GRAY, Color::WHITE);
        assert_eq!((out.r, out.g, out.b), (1.0, 1.0, 1.0));
    }

    #[test]
    fn color_burn_guards_zero_divisor() {
        let out = Color::color_burn(Color::GRAY, Color::BLACK);
        assert_eq!((out.r, out.g, out.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn blend_modes_multiply_alpha() {
        let a = Color::WHITE.with_alpha(0.5);
        let b = Color::BLACK.with_alpha(0.5);
        assert_eq!(Color::multiply(a, b).a, 0.25);
        assert_eq!(Color::screen(a, b).a, 0.25);
        assert_eq!(Color::overlay(a, b).a, 0.25);
        assert_eq!(Color::soft_light(a, b).a, 0.25);
    }

    #[test]
    fn soft_light_neutral_at_mid_blend() {
        // b = 0.5 leaves the base channel unchanged.
        let out = Color::soft_light(Color::new(0.3, 0.6, 0.9, 1.0), Color::GRAY);
        assert_close(out, Color::new(0.3, 0.6, 0.9, 1.0), 1e-6);
    }

    // ── display ───────────────────────────────────────────────────────────

    #[test]
    fn display_renders_hex() {
        assert_eq!(Color::RED.to_string(), "#ff0000");
    }
}
