// File: crates/report-figures/src/bin/molecular_pathways.rs
// Summary: Renders the molecular crosstalk diagram to a vector PDF, then previews it.

use anyhow::{Context, Result};
use clap::Parser;
use report_figures::{init_tracing, pathways, preview, OutputArgs};

/// Render the molecular pathway diagram.
#[derive(Parser, Debug)]
#[command(name = "molecular-pathways", version, about)]
struct Cli {
    #[command(flatten)]
    out: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let diagram = pathways::diagram(cli.out.dpi).context("assembling pathway diagram")?;
    tracing::info!(nodes = diagram.nodes.len(), edges = diagram.edges.len(), "diagram ready");

    let out = cli.out.output_or(pathways::OUTPUT_FILE);
    diagram
        .render_to_pdf(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), "wrote pathway diagram");

    let small = pathways::diagram(cli.out.preview_dpi)?;
    preview(&cli.out, "Molecular pathways", || small.render_to_rgba8(true));
    Ok(())
}
