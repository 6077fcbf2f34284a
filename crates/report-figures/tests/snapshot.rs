// File: crates/report-figures/tests/snapshot.rs
// Purpose: Golden snapshots of both report figures with bless flow.
// Behavior:
// - Renders each figure without text (fonts differ across machines) at a low dpi.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use figure_core::RenderOptions;
use report_figures::{hematology, pathways, trends};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        // compare decoded pixels to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions(), "size differs: {}", path.display());
        assert!(got_img.as_raw() == want_img.as_raw(), "pixels differ from golden snapshot: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

#[test]
fn golden_trends_grid() {
    let rows = hematology::observations().expect("observations");
    let fig = trends::build_figure(&rows, 50.0).expect("figure");
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    write_or_compare("trends.png", &fig.render_to_png_bytes(&opts).expect("render"));
}

#[test]
fn golden_pathway_shapes() {
    let d = pathways::diagram(40.0).expect("diagram");
    write_or_compare("pathways.png", &d.render_to_png_bytes(false).expect("render"));
}
