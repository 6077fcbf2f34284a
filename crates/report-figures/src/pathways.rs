// File: crates/report-figures/src/pathways.rs
// Summary: Molecular crosstalk diagram for the SF3B1/ASXL1/JAK2/CBL quadruple mutation.

use figure_core::theme::gray;
use figure_core::{
    parse_hex, with_alpha, Band, Color, Diagram, EdgeStyle, FigureSize, HAlign, Legend, LegendEntry, NodeKind,
    Result, TextSpec, VAlign,
};

pub const OUTPUT_FILE: &str = "MDS_MPN_molecular_pathways.pdf";
pub const TITLE: &str = "Molecular Crosstalk in MDS/MPN-SF3B1-T with SF3B1/ASXL1/JAK2/CBL Quadruple Mutation";

/// 16 x 12 in page.
pub fn figure_size(dpi: f32) -> FigureSize {
    FigureSize::new(16.0, 12.0, dpi)
}

/// Named colors. Mechanism and intermediate nodes look up the first word of
/// their label here, so the pathway keys double as node accents.
const PALETTE: [(&str, &str); 12] = [
    ("SF3B1", "#e74c3c"),
    ("ASXL1", "#3498db"),
    ("JAK2", "#2ecc71"),
    ("CBL", "#9b59b6"),
    ("mitochondria", "#f39c12"),
    ("erythroid", "#e74c3c"),
    ("megakaryocyte", "#2ecc71"),
    ("clinical", "#34495e"),
    ("Splicing", "#e74c3c"),
    ("PRC2", "#3498db"),
    ("JH2", "#2ecc71"),
    ("TKB", "#9b59b6"),
];

const FALLBACK_ACCENT: &str = "#7f8c8d";
const INK: &str = "#2c3e50";

pub fn palette(key: &str) -> Option<&'static str> {
    PALETTE.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn color(key: &str) -> Result<Color> {
    parse_hex(palette(key).unwrap_or(FALLBACK_ACCENT))
}

/// Accent for an outlined node: palette entry of the label's first word, else grey.
pub fn accent_for(label: &str) -> Result<Color> {
    color(label.split_whitespace().next().unwrap_or(""))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Gene(&'static str),
    Mechanism,
    Down,
    Up,
    Clinical(Option<&'static str>),
    Intermediate,
}

const NODES: [(&str, (f64, f64), Role); 22] = [
    // mutated genes
    ("SF3B1", (2.0, 8.0), Role::Gene("40.5%")),
    ("ASXL1", (5.0, 8.0), Role::Gene("19.8%")),
    ("JAK2", (8.0, 8.0), Role::Gene("17.5%")),
    ("CBL", (11.0, 8.0), Role::Gene("16.2%")),
    // SF3B1 pathway
    ("Splicing Defects", (1.5, 6.5), Role::Mechanism),
    ("ABCB7 ↓", (1.0, 5.0), Role::Down),
    ("ALAS2 ↓", (2.0, 5.0), Role::Down),
    ("Mitochondrial Iron", (1.5, 4.0), Role::Intermediate),
    ("GATA1/KLF1 ↓", (1.5, 3.0), Role::Down),
    // ASXL1 pathway
    ("PRC2 Disruption", (5.0, 6.5), Role::Mechanism),
    ("H3K27me3 Loss", (5.0, 5.0), Role::Intermediate),
    // JAK2 pathway
    ("JH2 Destabilization", (8.0, 6.5), Role::Mechanism),
    ("p-STAT5 ↑", (7.5, 5.5), Role::Up),
    ("Partial Kinase", (8.5, 5.0), Role::Intermediate),
    // CBL pathway
    ("TKB Domain Mut", (11.0, 6.5), Role::Mechanism),
    ("RAS/MAPK ↑", (10.5, 5.5), Role::Up),
    ("JAK2 Ubiquitination", (11.5, 5.0), Role::Intermediate),
    // crosstalk
    ("Epigenetic Repression", (3.5, 4.5), Role::Intermediate),
    ("Signaling Crosstalk", (9.5, 4.5), Role::Intermediate),
    // clinical phenotype
    ("Anemia", (3.0, 1.0), Role::Clinical(Some("Hb: 91→101 g/L"))),
    ("Thrombocytosis", (9.0, 1.0), Role::Clinical(Some("Platelets: 502→429×10⁹/L"))),
    ("Platelet Decline", (11.0, 1.0), Role::Clinical(None)),
];

#[derive(Clone, Copy)]
enum Line {
    Solid,
    Dashed,
    Dotted,
}

/// (from, to, palette key or literal hex, width, dash)
const EDGES: [(&str, &str, &str, f32, Line); 26] = [
    // SF3B1 pathway
    ("SF3B1", "Splicing Defects", "SF3B1", 3.0, Line::Solid),
    ("Splicing Defects", "ABCB7 ↓", "SF3B1", 3.0, Line::Solid),
    ("Splicing Defects", "ALAS2 ↓", "SF3B1", 3.0, Line::Solid),
    ("ABCB7 ↓", "Mitochondrial Iron", "mitochondria", 3.0, Line::Dashed),
    ("ALAS2 ↓", "Mitochondrial Iron", "mitochondria", 3.0, Line::Dashed),
    ("Mitochondrial Iron", "GATA1/KLF1 ↓", "erythroid", 3.0, Line::Solid),
    ("GATA1/KLF1 ↓", "Anemia", "clinical", 3.0, Line::Solid),
    // ASXL1 pathway
    ("ASXL1", "PRC2 Disruption", "ASXL1", 3.0, Line::Solid),
    ("PRC2 Disruption", "H3K27me3 Loss", "ASXL1", 3.0, Line::Solid),
    ("H3K27me3 Loss", "Epigenetic Repression", "ASXL1", 3.0, Line::Solid),
    ("Epigenetic Repression", "GATA1/KLF1 ↓", "erythroid", 3.0, Line::Dashed),
    ("Epigenetic Repression", "Anemia", "clinical", 2.0, Line::Solid),
    // JAK2 pathway
    ("JAK2", "JH2 Destabilization", "JAK2", 3.0, Line::Solid),
    ("JH2 Destabilization", "p-STAT5 ↑", "JAK2", 3.0, Line::Solid),
    ("JH2 Destabilization", "Partial Kinase", "JAK2", 3.0, Line::Solid),
    ("p-STAT5 ↑", "Signaling Crosstalk", "JAK2", 3.0, Line::Solid),
    ("Partial Kinase", "Signaling Crosstalk", "JAK2", 3.0, Line::Solid),
    ("Signaling Crosstalk", "Thrombocytosis", "megakaryocyte", 3.0, Line::Solid),
    // CBL pathway
    ("CBL", "TKB Domain Mut", "CBL", 3.0, Line::Solid),
    ("TKB Domain Mut", "RAS/MAPK ↑", "CBL", 3.0, Line::Solid),
    ("TKB Domain Mut", "JAK2 Ubiquitination", "CBL", 3.0, Line::Solid),
    ("RAS/MAPK ↑", "Signaling Crosstalk", "CBL", 3.0, Line::Solid),
    ("JAK2 Ubiquitination", "Signaling Crosstalk", "CBL", 3.0, Line::Dashed),
    ("Signaling Crosstalk", "Platelet Decline", "clinical", 3.0, Line::Dashed),
    // crosstalk
    ("SF3B1", "Epigenetic Repression", "SF3B1", 2.0, Line::Dotted),
    ("ASXL1", "Mitochondrial Iron", "ASXL1", 2.0, Line::Dotted),
    ("JAK2", "JAK2 Ubiquitination", "#95a5a6", 2.0, Line::Dotted),
];

/// Gene headline above each column: (x, palette key, text).
const HEADLINES: [(f64, &str, &str); 4] = [
    (2.0, "SF3B1", "SF3B1 p.K700E: Splicing Dysregulation"),
    (5.0, "ASXL1", "ASXL1 p.G646Wfs*12: Epigenetic Deregulation"),
    (8.0, "JAK2", "JAK2 p.R683G: Partial Kinase Activation"),
    (11.0, "CBL", "CBL p.R149Q: RTK Signaling Dysfunction"),
];

const KEY_FINDINGS: [&str; 4] = [
    "• Dominant SF3B1 clone (VAF 40.5%) mitigates ASXL1 leukemogenicity",
    "• JAK2 p.R683G partial kinase activation (1.8× STAT5 phosphorylation)",
    "• CBL p.R149Q enables self-limiting thrombocytosis",
    "• Mutation synergy fosters hematologic stability without therapy",
];

/// Background stripes: (y0, y1, color), drawn at 30 % opacity.
const BANDS: [(f64, f64, &str); 3] = [(7.0, 10.0, "#e8f4f8"), (2.0, 7.0, "#f1f8e9"), (0.0, 2.0, "#f9ebeb")];

fn node_kind(role: Role) -> NodeKind {
    match role {
        Role::Gene(vaf) => NodeKind::Gene { vaf: vaf.to_string() },
        Role::Mechanism => NodeKind::Mechanism,
        Role::Down => NodeKind::Down,
        Role::Up => NodeKind::Up,
        Role::Clinical(metric) => NodeKind::Clinical { metric: metric.map(str::to_string) },
        Role::Intermediate => NodeKind::Intermediate,
    }
}

fn node_accent(label: &str, role: Role) -> Result<Color> {
    match role {
        Role::Gene(_) => color(label),
        Role::Down => color("erythroid"),
        Role::Up => color("JAK2"),
        Role::Clinical(_) => color("clinical"),
        Role::Mechanism | Role::Intermediate => accent_for(label),
    }
}

fn edge_style(key: &str, width: f32, line: Line) -> Result<EdgeStyle> {
    let c = if key.starts_with('#') { parse_hex(key)? } else { color(key)? };
    let style = EdgeStyle::new(c, width);
    Ok(match line {
        Line::Solid => style,
        Line::Dashed => style.dashed(),
        Line::Dotted => style.dotted(),
    })
}

/// Assemble the full diagram and check that every edge names known nodes.
pub fn diagram(dpi: f32) -> Result<Diagram> {
    let mut d = Diagram::new(figure_size(dpi), (-1.0, 15.0), (0.0, 10.0));
    let ink = parse_hex(INK)?;
    d.title = Some((TITLE.to_string(), TextSpec::new(16.0, ink).bold()));

    for (y0, y1, hex) in BANDS {
        d.bands.push(Band { y0, y1, color: with_alpha(parse_hex(hex)?, 0.3) });
    }
    for (label, pos, role) in NODES {
        d.add_node(label, pos, node_kind(role), node_accent(label, role)?);
    }
    for (from, to, key, width, line) in EDGES {
        d.add_edge(from, to, edge_style(key, width, line)?);
    }

    for (x, key, text) in HEADLINES {
        d.add_text(text, (x, 9.5), TextSpec::new(12.0, color(key)?).bold(), HAlign::Center, VAlign::Baseline);
    }
    d.add_text("Key Findings:", (13.0, 6.0), TextSpec::new(12.0, ink).bold(), HAlign::Left, VAlign::Baseline);
    let body = parse_hex("#34495e")?;
    for (i, line) in KEY_FINDINGS.iter().enumerate() {
        d.add_text(*line, (13.0, 5.0 - i as f64 * 0.8), TextSpec::new(10.0, body), HAlign::Left, VAlign::Baseline);
    }

    let mut entries = Vec::with_capacity(6);
    for gene in ["SF3B1", "ASXL1", "JAK2", "CBL"] {
        entries.push(LegendEntry { label: format!("{gene} Pathway"), style: EdgeStyle::new(color(gene)?, 3.0) });
    }
    entries.push(LegendEntry { label: "Inhibitory Effect".into(), style: EdgeStyle::new(gray(), 2.0).dashed() });
    entries.push(LegendEntry { label: "Synergistic Interaction".into(), style: EdgeStyle::new(gray(), 2.0).dotted() });
    d.legend = Some(Legend { entries, columns: 3, font_size: 11.0, anchor: (0.5, -0.1) });

    d.validate()?;
    Ok(d)
}
