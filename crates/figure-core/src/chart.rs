// File: crates/figure-core/src/chart.rs
// Summary: Subplot grid of line panels and its headless rendering (Skia CPU raster surfaces).

use skia_safe as skia;

use crate::axis::Axis;
use crate::error::{FigureError, Result};
use crate::geometry::RectF;
use crate::scale::LinearScale;
use crate::series::{LineSeries, Marker, RefLine};
use crate::text::{HAlign, TextShaper, TextSpec, VAlign};
use crate::theme::Theme;
use crate::types::{FigureSize, Insets};

/// Tick mark length and gap before tick labels, in points.
const TICK_LEN: f32 = 3.5;
const TICK_PAD: f32 = 3.5;
const SPINE_WIDTH: f32 = 0.8;
/// Height reserved above the grid for the figure title.
const TITLE_BAND: f32 = 30.0;
const OUTER_PAD: f32 = 6.0;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    /// When false no text is drawn; keeps pixel output independent of installed fonts.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::report(), draw_labels: true }
    }
}

/// One subplot: axes, line series and horizontal reference lines.
#[derive(Clone, Debug)]
pub struct Panel {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
    pub ref_lines: Vec<RefLine>,
}

impl Panel {
    pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Self { x_axis, y_axis, series: Vec::new(), ref_lines: Vec::new() }
    }

    pub fn add_series(&mut self, series: LineSeries) {
        self.series.push(series);
    }

    pub fn add_ref_line(&mut self, line: RefLine) {
        self.ref_lines.push(line);
    }

    /// Data limits over all series; reference lines widen the y range only.
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let (x0, x1, mut y0, mut y1) = self
            .series
            .iter()
            .filter_map(LineSeries::bounds)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)))?;
        for r in &self.ref_lines {
            y0 = y0.min(r.y);
            y1 = y1.max(r.y);
        }
        Some((x0, x1, y0, y1))
    }

    /// Fit both axes to the data plus `margin` (fraction of the span) on each side.
    /// Returns false and leaves the axes untouched when there is no data.
    pub fn autoscale(&mut self, margin: f64) -> bool {
        let Some((x0, x1, y0, y1)) = self.data_bounds() else { return false };
        let (x0, x1) = pad_range(x0, x1, margin);
        let (y0, y1) = pad_range(y0, y1, margin);
        self.x_axis.min = x0;
        self.x_axis.max = x1;
        self.y_axis.min = y0;
        self.y_axis.max = y1;
        true
    }
}

fn pad_range(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    if (hi - lo).abs() < 1e-12 {
        // flat data: widen around the value the way a plotting default would
        let d = if lo.abs() > 1e-12 { lo.abs() * 0.05 } else { 0.05 };
        return (lo - d, hi + d);
    }
    let m = (hi - lo) * margin;
    (lo - m, hi + m)
}

/// A titled grid of `rows x cols` panels on a page of `size`.
#[derive(Clone, Debug)]
pub struct Figure {
    pub size: FigureSize,
    pub title: Option<String>,
    pub title_size: f32,
    pub tick_label_size: f32,
    pub axis_label_size: f32,
    pub rows: usize,
    pub cols: usize,
    /// Row-major panels.
    pub panels: Vec<Panel>,
    pub insets: Insets,
}

impl Figure {
    pub fn new(size: FigureSize, rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let panels = (0..rows * cols)
            .map(|_| Panel::new(Axis::new("", 0.0, 1.0), Axis::new("", 0.0, 1.0)))
            .collect();
        Self {
            size,
            title: None,
            title_size: 14.0,
            tick_label_size: 10.0,
            axis_label_size: 10.0,
            rows,
            cols,
            panels,
            insets: Insets::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>, size: f32) -> Self {
        self.title = Some(title.into());
        self.title_size = size;
        self
    }

    pub fn panel_mut(&mut self, row: usize, col: usize) -> Result<&mut Panel> {
        if row >= self.rows || col >= self.cols {
            return Err(FigureError::PanelOutOfRange { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(&mut self.panels[row * self.cols + col])
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        (row < self.rows && col < self.cols).then(|| &self.panels[row * self.cols + col])
    }

    /// Autoscale every panel; a panel without data is an error.
    pub fn autoscale(&mut self, margin: f64) -> Result<()> {
        let cols = self.cols;
        for (i, p) in self.panels.iter_mut().enumerate() {
            if !p.autoscale(margin) {
                return Err(FigureError::EmptyPanel { row: i / cols, col: i % cols });
            }
        }
        Ok(())
    }

    /// Plot rectangles (points) in row-major order.
    pub fn plot_rects(&self) -> Vec<RectF> {
        let (w, h) = self.size.points();
        let top = if self.title.is_some() { TITLE_BAND } else { OUTER_PAD };
        let cell_w = (w - 2.0 * OUTER_PAD) / self.cols as f32;
        let cell_h = (h - top - OUTER_PAD) / self.rows as f32;
        let ins = self.insets;
        (0..self.rows * self.cols)
            .map(|i| {
                let (r, c) = (i / self.cols, i % self.cols);
                let left = OUTER_PAD + c as f32 * cell_w;
                let ctop = top + r as f32 * cell_h;
                RectF::from_ltwh(
                    left + ins.left,
                    ctop + ins.top,
                    (cell_w - ins.hsum()).max(1.0),
                    (cell_h - ins.vsum()).max(1.0),
                )
            })
            .collect()
    }

    /// Draw the whole figure onto `canvas`, whose unit is one point.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let (w, h) = self.size.points();
        let shaper = opts.draw_labels.then(TextShaper::new);
        let theme = &opts.theme;

        let mut bg = skia::Paint::default();
        bg.set_color(theme.background);
        canvas.draw_rect(skia::Rect::from_wh(w, h), &bg);

        if let (Some(shaper), Some(title)) = (&shaper, &self.title) {
            let spec = TextSpec::new(self.title_size, theme.title);
            shaper.draw(canvas, title, w * 0.5, TITLE_BAND * 0.5, &spec, HAlign::Center, VAlign::Center);
        }

        for (panel, rect) in self.panels.iter().zip(self.plot_rects()) {
            tracing::debug!(left = rect.left, top = rect.top, width = rect.width(), height = rect.height(), "panel");
            draw_panel(canvas, panel, rect, theme, shaper.as_ref(), self);
        }
    }

    /// Render to an RGBA8 buffer at the figure's dpi: (pixels, width, height, stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.raster(opts)?;
        read_rgba8(&mut surface)
    }

    /// Render to PNG bytes at the figure's dpi.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.raster(opts)?;
        encode_png(&mut surface)
    }

    /// Render the figure to a PNG at `output_png_path`.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        write_file(output_png_path.as_ref(), &bytes)
    }

    fn raster(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let (pw, ph) = self.size.pixels();
        let mut surface = skia::surfaces::raster_n32_premul((pw, ph)).ok_or(FigureError::Surface("raster"))?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);
        let s = self.size.raster_scale();
        canvas.scale((s, s));
        self.draw(canvas, opts);
        Ok(surface)
    }
}

// ---- raster helpers (shared with the diagram renderer) ------------------------

pub(crate) fn read_rgba8(surface: &mut skia::Surface) -> Result<(Vec<u8>, i32, i32, usize)> {
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let stride = w as usize * 4;
    let mut pixels = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
        return Err(FigureError::Encode("RGBA pixels"));
    }
    Ok((pixels, w, h, stride))
}

pub(crate) fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or(FigureError::Encode("PNG"))?;
    Ok(data.as_bytes().to_vec())
}

pub(crate) fn write_file(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

// ---- panel drawing ------------------------------------------------------------

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

fn draw_panel(
    canvas: &skia::Canvas,
    panel: &Panel,
    rect: RectF,
    theme: &Theme,
    shaper: Option<&TextShaper>,
    fig: &Figure,
) {
    let sx = LinearScale::new(panel.x_axis.min, panel.x_axis.max, rect.left, rect.right);
    let sy = LinearScale::new(panel.y_axis.min, panel.y_axis.max, rect.bottom, rect.top);
    let plot: skia::Rect = rect.into();

    let mut face = skia::Paint::default();
    face.set_color(theme.axes_face);
    canvas.draw_rect(plot, &face);

    canvas.save();
    canvas.clip_rect(plot, None, true);
    for r in &panel.ref_lines {
        let y = sy.to_px(r.y);
        canvas.draw_line((rect.left, y), (rect.right, y), &stroke(r.color, r.width));
    }
    for s in &panel.series {
        draw_line_series(canvas, s, &sx, &sy);
    }
    canvas.restore();

    // spines
    canvas.draw_rect(plot, &stroke(theme.axis_line, SPINE_WIDTH));

    // ticks and tick labels
    let tick_paint = stroke(theme.tick, SPINE_WIDTH);
    let label_spec = TextSpec::new(fig.tick_label_size, theme.tick_label);
    for (x, text) in panel.x_axis.tick_labels() {
        let px = sx.to_px(x);
        canvas.draw_line((px, rect.bottom), (px, rect.bottom + TICK_LEN), &tick_paint);
        if let Some(sh) = shaper {
            sh.draw(canvas, &text, px, rect.bottom + TICK_LEN + TICK_PAD, &label_spec, HAlign::Center, VAlign::Top);
        }
    }
    let mut widest = 0.0f32;
    for (y, text) in panel.y_axis.tick_labels() {
        let py = sy.to_px(y);
        canvas.draw_line((rect.left - TICK_LEN, py), (rect.left, py), &tick_paint);
        if let Some(sh) = shaper {
            widest = widest.max(sh.measure_width(&text, &label_spec));
            sh.draw(canvas, &text, rect.left - TICK_LEN - TICK_PAD, py, &label_spec, HAlign::Right, VAlign::Center);
        }
    }

    if let Some(sh) = shaper {
        let spec = TextSpec::new(fig.axis_label_size, theme.axis_label);
        if !panel.y_axis.label.is_empty() {
            let x = rect.left - TICK_LEN - TICK_PAD - widest - 4.0 - fig.axis_label_size * 0.6;
            sh.draw_vertical(canvas, &panel.y_axis.label, x, (rect.top + rect.bottom) * 0.5, &spec);
        }
        if !panel.x_axis.label.is_empty() {
            let y = rect.bottom + TICK_LEN + TICK_PAD + fig.tick_label_size * 1.4;
            sh.draw(canvas, &panel.x_axis.label, (rect.left + rect.right) * 0.5, y, &spec, HAlign::Center, VAlign::Top);
        }
    }
}

fn draw_line_series(canvas: &skia::Canvas, series: &LineSeries, sx: &LinearScale, sy: &LinearScale) {
    let pts: Vec<(f32, f32)> = series
        .points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| (sx.to_px(x), sy.to_px(y)))
        .collect();
    if pts.is_empty() {
        return;
    }

    if pts.len() >= 2 {
        let mut path = skia::Path::new();
        path.move_to(pts[0]);
        for &p in &pts[1..] {
            path.line_to(p);
        }
        let mut line = stroke(series.color, series.width);
        line.set_stroke_join(skia::paint::Join::Round);
        line.set_stroke_cap(skia::paint::Cap::Round);
        canvas.draw_path(&path, &line);
    }

    if let Some(Marker::Circle { radius }) = series.marker {
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_color(series.color);
        for &p in &pts {
            canvas.draw_circle(p, radius, &fill);
        }
    }
}
