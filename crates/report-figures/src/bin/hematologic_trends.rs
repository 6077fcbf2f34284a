// File: crates/report-figures/src/bin/hematologic_trends.rs
// Summary: Renders the 2x2 blood count trend grid to a PNG, then previews it.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use figure_core::RenderOptions;
use report_figures::{hematology, init_tracing, preview, trends, OutputArgs};

/// Render the hematologic trends figure.
#[derive(Parser, Debug)]
#[command(name = "hematologic-trends", version, about)]
struct Cli {
    #[command(flatten)]
    out: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let rows = hematology::observations().context("parsing observation table")?;
    ensure!(hematology::is_chronological(&rows), "observation dates are not in order");
    tracing::info!(rows = rows.len(), "loaded observations");

    let opts = RenderOptions::default();
    let fig = trends::build_figure(&rows, cli.out.dpi)?;
    let out = cli.out.output_or(trends::OUTPUT_FILE);
    fig.render_to_png(&opts, &out)
        .with_context(|| format!("writing {}", out.display()))?;
    let (w, h) = fig.size.pixels();
    tracing::info!(path = %out.display(), width = w, height = h, "wrote trends figure");

    let small = trends::build_figure(&rows, cli.out.preview_dpi)?;
    preview(&cli.out, trends::TITLE, || small.render_to_rgba8(&opts));
    Ok(())
}
