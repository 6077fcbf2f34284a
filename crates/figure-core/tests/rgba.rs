// File: crates/figure-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use figure_core::{Axis, Color, Figure, FigureSize, LineSeries, RefLine, RenderOptions};

#[test]
fn render_rgba8_buffer() {
    let mut fig = Figure::new(FigureSize::new(4.0, 3.0, 72.0), 1, 1);
    let p = fig.panel_mut(0, 0).expect("panel");
    p.x_axis = Axis::new("X", 0.0, 4.0);
    p.y_axis = Axis::new("Y", 0.0, 4.0);
    p.add_series(LineSeries::new(vec![(0.0, 0.0), (4.0, 4.0)], Color::BLACK));
    p.add_ref_line(RefLine { width: 3.0, ..RefLine::new(2.0, Color::from_rgb(0xff, 0, 0)) });

    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let (px, w, h, stride) = fig.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!((w, h), (288, 216));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // top-left corner is opaque white background
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);

    // the reference line crosses the middle of the plot area in red
    let rect = fig.plot_rects()[0];
    let (x, y) = (
        ((rect.left + rect.right) * 0.5 + 20.0) as usize,
        ((rect.top + rect.bottom) * 0.5).round() as usize,
    );
    let i = y * stride + x * 4;
    assert!(px[i] > 200 && px[i + 1] < 80, "expected red at ({x}, {y}), got {:?}", &px[i..i + 4]);
}
