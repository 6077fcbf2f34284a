// File: crates/figure-core/src/text.rs
// Summary: Text shaping and anchored drawing on top of Skia textlayout.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::geometry::RectF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Baseline,
}

/// Size (points), weight, slant and color of a run of text.
#[derive(Clone, Copy, Debug)]
pub struct TextSpec {
    pub size: f32,
    pub color: skia::Color,
    pub bold: bool,
    pub italic: bool,
}

impl TextSpec {
    pub fn new(size: f32, color: skia::Color) -> Self {
        Self { size, color, bold: false, italic: false }
    }
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // system fallback picks up glyphs such as arrows and superscripts
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(spec: &TextSpec) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(spec.size.max(1.0));
        ts.set_color(spec.color);
        let style = match (spec.bold, spec.italic) {
            (true, true) => skia::FontStyle::bold_italic(),
            (true, false) => skia::FontStyle::bold(),
            (false, true) => skia::FontStyle::italic(),
            (false, false) => skia::FontStyle::normal(),
        };
        ts.set_font_style(style);
        ts.set_font_families(&["DejaVu Sans", "Arial", "Helvetica", "Segoe UI", "Roboto", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, spec: &TextSpec) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(spec));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Width of the longest line, in points.
    pub fn measure_width(&self, text: &str, spec: &TextSpec) -> f32 {
        self.layout(text, spec).longest_line()
    }

    /// Box `text` occupies when anchored at `(x, y)`.
    pub fn bounds(&self, text: &str, x: f32, y: f32, spec: &TextSpec, h: HAlign, v: VAlign) -> RectF {
        let p = self.layout(text, spec);
        let (left, top) = anchor_origin(&p, x, y, h, v);
        RectF::from_ltwh(left, top, p.longest_line(), p.height())
    }

    /// Draw `text` so that `(x, y)` sits at the requested anchor.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, spec: &TextSpec, h: HAlign, v: VAlign) {
        let mut p = self.layout(text, spec);
        let origin = anchor_origin(&p, x, y, h, v);
        p.paint(canvas, origin);
    }

    /// Draw text rotated 90 degrees counter-clockwise, centered on `(x, y)`.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, spec: &TextSpec) {
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-90.0, None);
        self.draw(canvas, text, 0.0, 0.0, spec, HAlign::Center, VAlign::Center);
        canvas.restore();
    }
}

// Top-left corner for a laid out paragraph anchored at (x, y).
fn anchor_origin(p: &Paragraph, x: f32, y: f32, h: HAlign, v: VAlign) -> (f32, f32) {
    let w = p.longest_line();
    let left = match h {
        HAlign::Left => x,
        HAlign::Center => x - w * 0.5,
        HAlign::Right => x - w,
    };
    let top = match v {
        VAlign::Top => y,
        VAlign::Center => y - p.height() * 0.5,
        VAlign::Baseline => y - p.alphabetic_baseline(),
    };
    (left, top)
}
