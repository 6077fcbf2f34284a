// File: crates/report-figures/src/trends.rs
// Summary: 2x2 grid of blood count trends with clinical reference lines.

use figure_core::theme::gray;
use figure_core::{
    date_to_x, parse_hex, Axis, Figure, FigureSize, LineSeries, Marker, Panel, RefLine, Result, TickLocator,
};

use crate::hematology::Observation;

pub const OUTPUT_FILE: &str = "Hematologic_Parameters.png";
pub const TITLE: &str = "Hematologic Trends";

/// 12 x 8 in at 300 dpi.
pub fn figure_size(dpi: f32) -> FigureSize {
    FigureSize::new(12.0, 8.0, dpi)
}

/// Even months: Feb, Apr, Jun, Aug, Oct, Dec.
const EVEN_MONTHS: [u32; 6] = [2, 4, 6, 8, 10, 12];

/// One subplot recipe: where it goes and what it plots.
struct PanelSpec {
    row: usize,
    col: usize,
    label: &'static str,
    color: &'static str,
    reference: &'static [f64],
    y_locator: Option<TickLocator>,
    value: fn(&Observation) -> f64,
}

fn panel_specs() -> [PanelSpec; 4] {
    [
        PanelSpec {
            row: 0,
            col: 0,
            label: "Hemoglobin (g/L)",
            color: "#ff461f",
            reference: &[110.0],
            y_locator: Some(TickLocator::Multiple(2.0)),
            value: |o| o.hemoglobin_g_l,
        },
        PanelSpec {
            row: 0,
            col: 1,
            label: "RBC (×10¹²/L)",
            color: "#ff461f",
            reference: &[3.5],
            y_locator: None,
            value: |o| o.rbc_e12_l,
        },
        PanelSpec {
            row: 1,
            col: 0,
            label: "WBC (×10⁹/L)",
            color: "#afdd22",
            reference: &[10.0, 4.0],
            y_locator: None,
            value: |o| o.wbc_e9_l,
        },
        PanelSpec {
            row: 1,
            col: 1,
            label: "Platelets (×10⁹/L)",
            color: "#cca4e3",
            reference: &[300.0],
            y_locator: None,
            value: |o| o.platelets_e9_l,
        },
    ]
}

/// Build the trends figure from the observation rows.
pub fn build_figure(rows: &[Observation], dpi: f32) -> Result<Figure> {
    let mut fig = Figure::new(figure_size(dpi), 2, 2).with_title(TITLE, 14.0);
    for spec in panel_specs() {
        let color = parse_hex(spec.color)?;
        let points = rows.iter().map(|o| (date_to_x(o.date), (spec.value)(o))).collect();

        let mut y_axis = Axis::new(spec.label, 0.0, 1.0);
        if let Some(loc) = spec.y_locator {
            y_axis = y_axis.with_locator(loc);
        }
        let mut panel = Panel::new(Axis::dates(&EVEN_MONTHS), y_axis);
        panel.add_series(LineSeries::new(points, color).with_marker(Marker::default()));
        for &y in spec.reference {
            panel.add_ref_line(RefLine::new(y, gray()));
        }
        *fig.panel_mut(spec.row, spec.col)? = panel;
    }
    fig.autoscale(0.05)?;
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hematology::observations;

    fn figure() -> Figure {
        build_figure(&observations().unwrap(), 300.0).unwrap()
    }

    #[test]
    fn four_panels_with_labels() {
        let fig = figure();
        let labels: Vec<&str> = fig.panels.iter().map(|p| p.y_axis.label.as_str()).collect();
        assert_eq!(labels, ["Hemoglobin (g/L)", "RBC (×10¹²/L)", "WBC (×10⁹/L)", "Platelets (×10⁹/L)"]);
        assert_eq!(fig.title.as_deref(), Some(TITLE));
    }

    #[test]
    fn reference_lines_per_panel() {
        let fig = figure();
        let refs: Vec<Vec<f64>> = fig.panels.iter().map(|p| p.ref_lines.iter().map(|r| r.y).collect()).collect();
        assert_eq!(refs, vec![vec![110.0], vec![3.5], vec![10.0, 4.0], vec![300.0]]);
    }

    #[test]
    fn hemoglobin_ticks_every_two() {
        let fig = figure();
        let ticks = fig.panel(0, 0).unwrap().y_axis.ticks();
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 2.0).abs() < 1e-9));
        // reference line at 110 is inside the scaled range
        assert_eq!(ticks.last().copied(), Some(110.0));
    }

    #[test]
    fn rbc_ticks_every_five_hundredths() {
        let fig = figure();
        let labels: Vec<String> = fig.panel(0, 1).unwrap().y_axis.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert_eq!(labels, ["3.20", "3.25", "3.30", "3.35", "3.40", "3.45", "3.50"]);
    }

    #[test]
    fn x_ticks_on_even_months() {
        let fig = figure();
        let labels: Vec<String> = fig.panel(1, 1).unwrap().x_axis.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert_eq!(labels, ["2024-08", "2024-10", "2024-12", "2025-02"]);
    }

    #[test]
    fn wbc_range_covers_both_reference_lines() {
        let fig = figure();
        let y = &fig.panel(1, 0).unwrap().y_axis;
        assert!(y.min < 4.0 && y.max > 10.0);
    }
}
