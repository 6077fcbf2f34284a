// File: crates/figure-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests writing a PNG and a PDF.

use std::sync::{Arc, Mutex};

use figure_core::{
    Axis, Color, Diagram, EdgeStyle, Figure, FigureSize, LineSeries, NodeKind, RenderOptions,
};

/// In-memory log sink shared with a test subscriber.
#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log lock").extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn tiny_figure() -> Figure {
    let mut fig = Figure::new(FigureSize::new(4.0, 3.0, 100.0), 1, 1).with_title("Smoke", 12.0);
    let p = fig.panel_mut(0, 0).expect("panel");
    p.x_axis = Axis::new("X", 0.0, 4.0);
    p.y_axis = Axis::new("Y", 0.0, 4.0);
    p.add_series(LineSeries::new(
        vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)],
        Color::from_rgb(0x20, 0x78, 0xc8),
    ));
    fig
}

#[test]
fn render_smoke_png() {
    let fig = tiny_figure();
    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    fig.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = fig.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width(), img.height()), (400, 300));
}

#[test]
fn render_smoke_pdf() {
    let mut d = Diagram::new(FigureSize::new(4.0, 3.0, 72.0), (0.0, 4.0), (0.0, 3.0));
    d.add_node("A", (1.0, 2.0), NodeKind::Gene { vaf: "10%".into() }, Color::from_rgb(0xe7, 0x4c, 0x3c));
    d.add_node("B", (3.0, 1.0), NodeKind::Clinical { metric: Some("x: 1→2".into()) }, Color::from_rgb(0x34, 0x49, 0x5e));
    d.add_edge("A", "B", EdgeStyle::new(Color::BLACK, 3.0).dotted());
    d.validate().expect("valid");

    let out = std::path::PathBuf::from("target/test_out/smoke.pdf");
    d.render_to_pdf(&out).expect("render pdf");
    let bytes = std::fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "should be PDF header");
    let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).into_owned();
    assert!(tail.contains("%%EOF"), "should end with a trailer: {tail:?}");
}

#[test]
fn written_files_are_logged_at_info() {
    let logs = LogBuf::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    let out = std::path::PathBuf::from("target/test_out/logged.png");
    tracing::subscriber::with_default(subscriber, || {
        tiny_figure().render_to_png(&RenderOptions::default(), &out).expect("render");
    });

    let text = String::from_utf8(logs.0.lock().expect("log lock").clone()).expect("utf8 logs");
    assert!(text.contains("INFO") && text.contains("wrote file"), "{text}");
    assert!(text.contains("logged.png"), "{text}");
}
