// File: crates/report-figures/src/cli.rs
// Summary: Command-line options, logging setup and the optional preview step.

use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Options shared by both figure binaries. Defaults reproduce the report files.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file (defaults to the report file name in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Raster resolution in dots per inch
    #[arg(long, default_value_t = 300.0)]
    pub dpi: f32,

    /// Resolution of the preview window image
    #[arg(long, default_value_t = 80.0)]
    pub preview_dpi: f32,

    /// Write the file without opening a preview window
    #[arg(long)]
    pub no_show: bool,
}

impl OutputArgs {
    pub fn output_or(&self, default_name: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(default_name))
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

/// Show a rendered buffer unless disabled; preview problems are logged, not fatal.
pub fn preview(args: &OutputArgs, title: &str, render: impl FnOnce() -> figure_core::Result<(Vec<u8>, i32, i32, usize)>) {
    if args.no_show {
        return;
    }
    if !figure_preview::display_available() {
        tracing::warn!("no display available; skipping preview (use --no-show to silence)");
        return;
    }
    let shown = render()
        .map_err(anyhow::Error::from)
        .and_then(figure_preview::Rgba::from_rendered)
        .and_then(|img| figure_preview::show(title, &img));
    if let Err(e) = shown {
        tracing::warn!("preview failed: {e:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        out: OutputArgs,
    }

    #[test]
    fn defaults_match_report() {
        let cli = Cli::parse_from(["bin"]);
        assert_eq!(cli.out.dpi, 300.0);
        assert!(!cli.out.no_show);
        assert_eq!(cli.out.output_or("a.png"), PathBuf::from("a.png"));
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from(["bin", "-o", "out/x.pdf", "--dpi", "150", "--no-show"]);
        assert_eq!(cli.out.output_or("a.pdf"), PathBuf::from("out/x.pdf"));
        assert_eq!(cli.out.dpi, 150.0);
        assert!(cli.out.no_show);
    }
}
