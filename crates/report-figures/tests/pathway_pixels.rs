// File: crates/report-figures/tests/pathway_pixels.rs
// Purpose: Pixel checks of the pathway node shapes on a text-free raster.

use figure_core::scale::LinearScale;
use figure_core::Diagram;
use report_figures::pathways;

struct Raster {
    px: Vec<u8>,
    stride: usize,
    sx: LinearScale,
    sy: LinearScale,
    unit_y: f32,
}

impl Raster {
    // 72 dpi keeps one pixel per point; without labels the page is the nominal one.
    fn new() -> (Diagram, Self) {
        let d = pathways::diagram(72.0).expect("diagram");
        let (px, w, h, stride) = d.render_to_rgba8(false).expect("rgba render");
        assert_eq!((w, h), (1152, 864));
        let a = d.axes_rect();
        let sx = LinearScale::new(d.xlim.0, d.xlim.1, a.left, a.right);
        let sy = LinearScale::new(d.ylim.0, d.ylim.1, a.bottom, a.top);
        let unit_y = sy.unit().abs();
        (d, Self { px, stride, sx, sy, unit_y })
    }

    /// RGB at node `label`, shifted by `dy_units` data units (positive is up).
    fn at_node(&self, d: &Diagram, label: &str, dx_pt: f32, dy_units: f32) -> [u8; 3] {
        let n = d.node(label).unwrap_or_else(|| panic!("node {label}"));
        let x = self.sx.to_px(n.pos.0) + dx_pt;
        let y = self.sy.to_px(n.pos.1) - dy_units * self.unit_y;
        let i = y as usize * self.stride + x as usize * 4;
        [self.px[i], self.px[i + 1], self.px[i + 2]]
    }
}

#[test]
fn gene_box_is_filled_with_its_color() {
    let (d, r) = Raster::new();
    // #e74c3c at 90 % over the light blue band
    let [red, green, blue] = r.at_node(&d, "SF3B1", 0.0, 0.0);
    assert!(red > 200 && green < 130 && blue < 120, "SF3B1 box: {:?}", [red, green, blue]);
}

#[test]
fn down_triangle_sits_below_its_node() {
    let (d, r) = Raster::new();
    let [red, green, blue] = r.at_node(&d, "ABCB7 ↓", 0.0, -0.2);
    assert!(red > 200 && green < 110 && blue < 100, "ABCB7 triangle: {:?}", [red, green, blue]);
}

#[test]
fn up_triangle_sits_above_its_node() {
    let (d, r) = Raster::new();
    let [red, green, blue] = r.at_node(&d, "p-STAT5 ↑", 0.0, 0.2);
    assert!(green > 180 && red < 90 && blue < 150, "p-STAT5 triangle: {:?}", [red, green, blue]);
}

#[test]
fn clinical_box_is_dark() {
    let (d, r) = Raster::new();
    // #34495e at 80 % over the pink band
    let [red, green, blue] = r.at_node(&d, "Anemia", 0.0, 0.0);
    assert!((red as u32 + green as u32 + blue as u32) < 400 && blue > red, "Anemia box: {:?}", [red, green, blue]);
}

#[test]
fn intermediate_node_is_an_outlined_circle() {
    let (d, r) = Raster::new();
    let center = r.at_node(&d, "Mitochondrial Iron", 0.0, 0.0);
    assert!(center.iter().all(|&c| c > 230), "circle inside: {center:?}");

    // marker area 800 pt^2, so the outline runs at radius sqrt(800) / 2
    let ring = r.at_node(&d, "Mitochondrial Iron", 800f32.sqrt() * 0.5, 0.0);
    assert!(ring.iter().all(|&c| c > 90 && c < 200), "circle outline: {ring:?}");
}
