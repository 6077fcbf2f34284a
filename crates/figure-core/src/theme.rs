// File: crates/figure-core/src/theme.rs
// Summary: Report theme colors plus hex color parsing.

use skia_safe as skia;

use crate::error::{FigureError, Result};

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: skia::Color,
    pub axes_face: skia::Color,
    pub axis_line: skia::Color,
    pub tick: skia::Color,
    pub tick_label: skia::Color,
    pub axis_label: skia::Color,
    pub title: skia::Color,
    pub reference_line: skia::Color,
}

impl Theme {
    /// Plain white figure with black spines, the look of a default plotting style.
    pub fn report() -> Self {
        Self {
            background: skia::Color::WHITE,
            axes_face: skia::Color::WHITE,
            axis_line: skia::Color::BLACK,
            tick: skia::Color::BLACK,
            tick_label: skia::Color::BLACK,
            axis_label: skia::Color::BLACK,
            title: skia::Color::BLACK,
            reference_line: gray(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::report() }
}

/// The named color "gray" (#808080).
pub fn gray() -> skia::Color {
    skia::Color::from_argb(255, 0x80, 0x80, 0x80)
}

/// Parse `#rrggbb` (or `rrggbb`) into an opaque color.
pub fn parse_hex(s: &str) -> Result<skia::Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FigureError::InvalidColor(s.to_string()));
    }
    let v = u32::from_str_radix(digits, 16).map_err(|_| FigureError::InvalidColor(s.to_string()))?;
    Ok(skia::Color::from_argb(255, (v >> 16) as u8, (v >> 8) as u8, v as u8))
}

/// Replace the alpha channel; `alpha` is clamped to [0, 1].
pub fn with_alpha(c: skia::Color, alpha: f32) -> skia::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, c.r(), c.g(), c.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_palette() {
        let c = parse_hex("#ff461f").unwrap();
        assert_eq!((c.a(), c.r(), c.g(), c.b()), (255, 0xff, 0x46, 0x1f));
        assert_eq!(parse_hex("2c3e50").unwrap().b(), 0x50);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(parse_hex("#fff"), Err(FigureError::InvalidColor(_))));
        assert!(matches!(parse_hex("#gg0000"), Err(FigureError::InvalidColor(_))));
    }

    #[test]
    fn alpha_is_scaled() {
        let c = with_alpha(skia::Color::BLACK, 0.8);
        assert_eq!(c.a(), 204);
        assert_eq!(with_alpha(c, 7.0).a(), 255);
    }
}
