// File: crates/figure-core/src/diagram.rs
// Summary: Static node/edge diagram: model, referential checks, and PDF/PNG rendering.
//
// Layout is fixed by the caller: every node sits at a literal data coordinate
// and edges are drawn between node centers. Nothing here computes positions.

use std::collections::HashMap;

use skia_safe as skia;

use crate::chart::{encode_png, read_rgba8, write_file};
use crate::error::{FigureError, Result};
use crate::geometry::{arrow_barbs, Pt, Quad, RectF};
use crate::scale::LinearScale;
use crate::text::{HAlign, TextShaper, TextSpec, VAlign};
use crate::theme::{parse_hex, with_alpha};
use crate::types::FigureSize;

/// Connector curvature (fraction of the chord) and end clearance in points.
const EDGE_RAD: f32 = 0.1;
const EDGE_SHRINK: f32 = 15.0;
const EDGE_ALPHA: f32 = 0.8;
/// Blank margin kept around the drawn content when the page is fitted to it.
const PAGE_PAD: f32 = 7.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

impl Dash {
    /// On/off intervals in points, scaled with the stroke width.
    pub fn intervals(self, width: f32) -> Option<[f32; 2]> {
        let w = width.max(0.5);
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some([3.7 * w, 1.6 * w]),
            Dash::Dotted => Some([1.0 * w, 1.65 * w]),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EdgeStyle {
    pub color: skia::Color,
    pub width: f32,
    pub dash: Dash,
}

impl EdgeStyle {
    pub fn new(color: skia::Color, width: f32) -> Self {
        Self { color, width, dash: Dash::Solid }
    }
    pub fn dashed(mut self) -> Self {
        self.dash = Dash::Dashed;
        self
    }
    pub fn dotted(mut self) -> Self {
        self.dash = Dash::Dotted;
        self
    }
}

/// Visual role of a node; decides its shape and label treatment.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Filled box with a variant allele frequency caption.
    Gene { vaf: String },
    /// Outlined ellipse.
    Mechanism,
    /// Bold label with a downward triangle below it.
    Down,
    /// Bold label with an upward triangle above it.
    Up,
    /// Rounded dark box with an optional lab value caption.
    Clinical { metric: Option<String> },
    /// Outlined circle.
    Intermediate,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub label: String,
    pub pos: (f64, f64),
    pub kind: NodeKind,
    pub accent: skia::Color,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
}

/// Free text placed at a data coordinate.
#[derive(Clone, Debug)]
pub struct TextItem {
    pub text: String,
    pub pos: (f64, f64),
    pub spec: TextSpec,
    pub h: HAlign,
    pub v: VAlign,
}

/// Horizontal translucent stripe between two y values, spanning the x range.
#[derive(Clone, Copy, Debug)]
pub struct Band {
    pub y0: f64,
    pub y1: f64,
    pub color: skia::Color,
}

#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub label: String,
    pub style: EdgeStyle,
}

/// Framed legend laid out column-major, its lower center anchored at
/// `anchor` (fractions of the axes box; y may be negative to sit below it).
#[derive(Clone, Debug)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub columns: usize,
    pub font_size: f32,
    pub anchor: (f32, f32),
}

#[derive(Clone, Debug)]
pub struct Diagram {
    pub size: FigureSize,
    pub title: Option<(String, TextSpec)>,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub background: skia::Color,
    pub bands: Vec<Band>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub texts: Vec<TextItem>,
    pub legend: Option<Legend>,
}

impl Diagram {
    pub fn new(size: FigureSize, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self {
            size,
            title: None,
            xlim,
            ylim,
            background: skia::Color::WHITE,
            bands: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            texts: Vec::new(),
            legend: None,
        }
    }

    pub fn add_node(&mut self, label: impl Into<String>, pos: (f64, f64), kind: NodeKind, accent: skia::Color) {
        self.nodes.push(Node { label: label.into(), pos, kind, accent });
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, style: EdgeStyle) {
        self.edges.push(Edge { from: from.into(), to: to.into(), style });
    }

    pub fn add_text(&mut self, text: impl Into<String>, pos: (f64, f64), spec: TextSpec, h: HAlign, v: VAlign) {
        self.texts.push(TextItem { text: text.into(), pos, spec, h, v });
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Node labels are unique and every edge endpoint names a node.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashMap::with_capacity(self.nodes.len());
        for n in &self.nodes {
            if seen.insert(n.label.as_str(), n.pos).is_some() {
                return Err(FigureError::DuplicateNode(n.label.clone()));
            }
        }
        for e in &self.edges {
            for end in [&e.from, &e.to] {
                if !seen.contains_key(end.as_str()) {
                    return Err(FigureError::UnknownNode {
                        from: e.from.clone(),
                        to: e.to.clone(),
                        missing: end.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Axes box on the nominal page, in points.
    pub fn axes_rect(&self) -> RectF {
        let (w, h) = self.size.points();
        RectF::from_ltrb(36.0, 60.0, w - 36.0, h - 90.0)
    }

    fn scales(&self) -> (LinearScale, LinearScale) {
        let a = self.axes_rect();
        (
            LinearScale::new(self.xlim.0, self.xlim.1, a.left, a.right),
            LinearScale::new(self.ylim.0, self.ylim.1, a.bottom, a.top),
        )
    }

    /// Page area to emit: the nominal page grown to hold every text item, the
    /// title and the legend, plus a small pad. Without a shaper only the
    /// nominal page is used.
    pub fn page_bounds(&self, shaper: Option<&TextShaper>) -> RectF {
        let (w, h) = self.size.points();
        let mut b = RectF::from_ltrb(0.0, 0.0, w, h);
        let Some(sh) = shaper else { return b };
        let (sx, sy) = self.scales();
        let mut grow = |r: RectF| {
            b = RectF::from_ltrb(
                b.left.min(r.left - PAGE_PAD),
                b.top.min(r.top - PAGE_PAD),
                b.right.max(r.right + PAGE_PAD),
                b.bottom.max(r.bottom + PAGE_PAD),
            );
        };
        for t in &self.texts {
            grow(sh.bounds(&t.text, sx.to_px(t.pos.0), sy.to_px(t.pos.1), &t.spec, t.h, t.v));
        }
        if let Some((title, spec)) = &self.title {
            let a = self.axes_rect();
            grow(sh.bounds(title, (a.left + a.right) * 0.5, a.top - 20.0, spec, HAlign::Center, VAlign::Baseline));
        }
        if let Some(legend) = &self.legend {
            grow(legend_layout(legend, self.axes_rect(), sh).frame);
        }
        b
    }

    /// Draw onto a canvas in page points (origin at the nominal page's top-left).
    pub fn draw(&self, canvas: &skia::Canvas, shaper: Option<&TextShaper>) {
        let (sx, sy) = self.scales();
        let ux = sx.unit().abs();
        let uy = sy.unit().abs();
        let at = |p: (f64, f64)| Pt::new(sx.to_px(p.0), sy.to_px(p.1));
        let border = parse_hex("#2c3e50").unwrap_or(skia::Color::BLACK);

        for band in &self.bands {
            let r = RectF::from_ltrb(sx.to_px(self.xlim.0), sy.to_px(band.y1), sx.to_px(self.xlim.1), sy.to_px(band.y0));
            canvas.draw_rect(skia::Rect::from(r.sorted()), &fill(band.color));
        }

        // clinical boxes sit under the connectors
        for n in &self.nodes {
            if let NodeKind::Clinical { .. } = n.kind {
                let c = at(n.pos);
                let (hw, hh, pad) = (1.5 * ux, 0.4 * uy, 0.2);
                let r = skia::Rect::from_ltrb(c.x - hw - pad * ux, c.y - hh - pad * uy, c.x + hw + pad * ux, c.y + hh + pad * uy);
                canvas.draw_round_rect(r, pad * ux, pad * uy, &fill(with_alpha(n.accent, 0.8)));
                canvas.draw_round_rect(r, pad * ux, pad * uy, &stroke(with_alpha(border, 0.8), 1.5));
            }
        }

        let positions: HashMap<&str, Pt> = self.nodes.iter().map(|n| (n.label.as_str(), at(n.pos))).collect();
        for e in &self.edges {
            // validate() reports these; drawing just skips them
            let (Some(&a), Some(&b)) = (positions.get(e.from.as_str()), positions.get(e.to.as_str())) else {
                continue;
            };
            draw_edge(canvas, a, b, &e.style);
        }

        for n in &self.nodes {
            let c = at(n.pos);
            match &n.kind {
                NodeKind::Intermediate => {
                    // marker area of 800 pt^2
                    let r = (800.0f32).sqrt() * 0.5;
                    canvas.draw_circle(c, r, &fill(with_alpha(skia::Color::WHITE, 0.9)));
                    canvas.draw_circle(c, r, &stroke(with_alpha(n.accent, 0.9), 2.0));
                }
                NodeKind::Mechanism => {
                    let r = skia::Rect::from_ltrb(c.x - 1.5 * ux, c.y - 0.5 * uy, c.x + 1.5 * ux, c.y + 0.5 * uy);
                    canvas.draw_oval(r, &fill(with_alpha(skia::Color::WHITE, 0.9)));
                    canvas.draw_oval(r, &stroke(with_alpha(n.accent, 0.9), 2.0));
                }
                NodeKind::Gene { .. } => {
                    let r = skia::Rect::from_ltrb(c.x - 1.2 * ux, c.y - 0.5 * uy, c.x + 1.2 * ux, c.y + 0.5 * uy);
                    canvas.draw_rect(r, &fill(with_alpha(n.accent, 0.9)));
                    canvas.draw_rect(r, &stroke(with_alpha(border, 0.9), 2.0));
                }
                NodeKind::Down => draw_triangle(canvas, Pt::new(c.x, c.y + 0.2 * uy), 6.0, false, n.accent),
                NodeKind::Up => draw_triangle(canvas, Pt::new(c.x, c.y - 0.2 * uy), 6.0, true, n.accent),
                NodeKind::Clinical { .. } => {}
            }
        }

        let Some(sh) = shaper else { return };

        for n in &self.nodes {
            let c = at(n.pos);
            let center = |spec: TextSpec| sh.draw(canvas, &n.label, c.x, c.y, &spec, HAlign::Center, VAlign::Center);
            match &n.kind {
                NodeKind::Gene { vaf } => {
                    center(TextSpec::new(14.0, skia::Color::WHITE).bold());
                    let caption = TextSpec::new(10.0, border).italic();
                    sh.draw(canvas, &format!("VAF: {vaf}"), c.x, c.y + 0.7 * uy, &caption, HAlign::Center, VAlign::Top);
                }
                NodeKind::Mechanism => center(TextSpec::new(11.0, n.accent).bold()),
                NodeKind::Down | NodeKind::Up => center(TextSpec::new(12.0, n.accent).bold()),
                NodeKind::Clinical { metric } => {
                    center(TextSpec::new(12.0, skia::Color::WHITE).bold());
                    if let Some(m) = metric {
                        let spec = TextSpec::new(9.0, parse_hex("#ecf0f1").unwrap_or(skia::Color::WHITE));
                        sh.draw(canvas, m, c.x, c.y + 0.25 * uy, &spec, HAlign::Center, VAlign::Top);
                    }
                }
                NodeKind::Intermediate => center(TextSpec::new(10.0, n.accent).bold()),
            }
        }

        for t in &self.texts {
            let p = at(t.pos);
            sh.draw(canvas, &t.text, p.x, p.y, &t.spec, t.h, t.v);
        }

        if let Some((title, spec)) = &self.title {
            let a = self.axes_rect();
            sh.draw(canvas, title, (a.left + a.right) * 0.5, a.top - 20.0, spec, HAlign::Center, VAlign::Baseline);
        }

        if let Some(legend) = &self.legend {
            draw_legend(canvas, legend, self.axes_rect(), sh);
        }
    }

    /// Render a single-page vector PDF.
    pub fn render_to_pdf_bytes(&self) -> Result<Vec<u8>> {
        let shaper = TextShaper::new();
        let page = self.page_bounds(Some(&shaper));
        let mut out = Vec::new();
        {
            let document = skia::pdf::new_document(&mut out, None);
            let mut on_page = document.begin_page((page.width(), page.height()), None);
            let canvas = on_page.canvas();
            canvas.translate((-page.left, -page.top));
            canvas.draw_rect(skia::Rect::from(page), &fill(self.background));
            self.draw(canvas, Some(&shaper));
            on_page.end_page().close();
        }
        if out.is_empty() {
            return Err(FigureError::Encode("PDF"));
        }
        tracing::debug!(width_pt = page.width(), height_pt = page.height(), bytes = out.len(), "pdf page");
        Ok(out)
    }

    pub fn render_to_pdf(&self, output_pdf_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_pdf_bytes()?;
        write_file(output_pdf_path.as_ref(), &bytes)
    }

    /// Rasterize at the diagram's dpi. `draw_labels = false` skips all text.
    pub fn render_to_rgba8(&self, draw_labels: bool) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.raster(draw_labels)?;
        read_rgba8(&mut surface)
    }

    pub fn render_to_png_bytes(&self, draw_labels: bool) -> Result<Vec<u8>> {
        let mut surface = self.raster(draw_labels)?;
        encode_png(&mut surface)
    }

    fn raster(&self, draw_labels: bool) -> Result<skia::Surface> {
        let shaper = draw_labels.then(TextShaper::new);
        let page = self.page_bounds(shaper.as_ref());
        let s = self.size.raster_scale();
        let (pw, ph) = ((page.width() * s).round().max(1.0) as i32, (page.height() * s).round().max(1.0) as i32);
        let mut surface = skia::surfaces::raster_n32_premul((pw, ph)).ok_or(FigureError::Surface("raster"))?;
        let canvas = surface.canvas();
        canvas.clear(self.background);
        canvas.scale((s, s));
        canvas.translate((-page.left, -page.top));
        self.draw(canvas, shaper.as_ref());
        Ok(surface)
    }
}

// ---- drawing helpers ----------------------------------------------------------

fn fill(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

fn styled_stroke(style: &EdgeStyle, alpha: f32) -> skia::Paint {
    let mut p = stroke(with_alpha(style.color, alpha), style.width);
    if let Some(iv) = style.dash.intervals(style.width) {
        p.set_path_effect(skia::PathEffect::dash(&iv, 0.0));
    }
    p
}

fn draw_edge(canvas: &skia::Canvas, a: Pt, b: Pt, style: &EdgeStyle) {
    let Some(q) = Quad::arc3(a, b, EDGE_RAD).shrink(EDGE_SHRINK, EDGE_SHRINK) else { return };
    let mut path = skia::Path::new();
    path.move_to(q.p0);
    path.quad_to(q.c, q.p2);
    canvas.draw_path(&path, &styled_stroke(style, EDGE_ALPHA));

    // open "->" head, always solid
    let head_len = 4.0 + 2.0 * style.width;
    let [l, r] = arrow_barbs(q.p2, q.tangent(1.0), head_len, head_len * 0.5);
    let mut head = skia::Path::new();
    head.move_to(l);
    head.line_to(q.p2);
    head.line_to(r);
    let mut paint = stroke(with_alpha(style.color, EDGE_ALPHA), style.width);
    paint.set_stroke_join(skia::paint::Join::Miter);
    canvas.draw_path(&head, &paint);
}

fn draw_triangle(canvas: &skia::Canvas, center: Pt, half: f32, up: bool, color: skia::Color) {
    let s = if up { -1.0 } else { 1.0 };
    let mut path = skia::Path::new();
    path.move_to((center.x, center.y + s * half));
    path.line_to((center.x - half, center.y - s * half));
    path.line_to((center.x + half, center.y - s * half));
    path.close();
    canvas.draw_path(&path, &fill(color));
}

struct LegendLayout {
    frame: RectF,
    /// Handle start (x, y) and label origin for each entry.
    slots: Vec<(Pt, Pt)>,
}

fn legend_layout(legend: &Legend, axes: RectF, sh: &TextShaper) -> LegendLayout {
    let fs = legend.font_size;
    let (handle_len, handle_pad, col_gap, row_gap, border_pad) = (2.0 * fs, 0.8 * fs, 2.0 * fs, 0.5 * fs, 0.4 * fs);
    let spec = TextSpec::new(fs, skia::Color::BLACK);
    let cols = legend.columns.max(1);
    let rows = legend.entries.len().div_ceil(cols).max(1);
    let row_h = fs * 1.2;

    let mut col_widths = vec![0.0f32; cols];
    for (i, e) in legend.entries.iter().enumerate() {
        let col = i / rows;
        let w = handle_len + handle_pad + sh.measure_width(&e.label, &spec);
        if col < cols {
            col_widths[col] = col_widths[col].max(w);
        }
    }
    let inner_w: f32 = col_widths.iter().sum::<f32>() + col_gap * (cols as f32 - 1.0);
    let inner_h = rows as f32 * row_h + (rows as f32 - 1.0) * row_gap;
    let (w, h) = (inner_w + 2.0 * border_pad, inner_h + 2.0 * border_pad);

    let anchor_x = axes.left + legend.anchor.0 * axes.width();
    let anchor_y = axes.bottom - legend.anchor.1 * axes.height();
    let frame = RectF::from_ltwh(anchor_x - w * 0.5, anchor_y - h, w, h);

    let mut slots = Vec::with_capacity(legend.entries.len());
    for i in 0..legend.entries.len() {
        let (col, row) = (i / rows, i % rows);
        let x = frame.left + border_pad + col_widths[..col.min(cols)].iter().sum::<f32>() + col as f32 * col_gap;
        let y = frame.top + border_pad + row as f32 * (row_h + row_gap) + row_h * 0.5;
        slots.push((Pt::new(x, y), Pt::new(x + handle_len + handle_pad, y)));
    }
    LegendLayout { frame, slots }
}

fn draw_legend(canvas: &skia::Canvas, legend: &Legend, axes: RectF, sh: &TextShaper) {
    let layout = legend_layout(legend, axes, sh);
    let frame: skia::Rect = layout.frame.into();
    let radius = 0.2 * legend.font_size;
    canvas.draw_round_rect(frame, radius, radius, &fill(with_alpha(skia::Color::WHITE, 0.8)));
    canvas.draw_round_rect(frame, radius, radius, &stroke(with_alpha(skia::Color::from_rgb(0xcc, 0xcc, 0xcc), 0.8), 1.0));

    let spec = TextSpec::new(legend.font_size, skia::Color::BLACK);
    let handle_len = 2.0 * legend.font_size;
    for (entry, (handle, label)) in legend.entries.iter().zip(&layout.slots) {
        canvas.draw_line((handle.x, handle.y), (handle.x + handle_len, handle.y), &styled_stroke(&entry.style, 1.0));
        sh.draw(canvas, &entry.label, label.x, label.y, &spec, HAlign::Left, VAlign::Center);
    }
}
