// File: crates/figure-core/src/lib.rs
// Summary: Core library entry point; figure model plus Skia-backed PNG/PDF rendering.

pub mod axis;
pub mod chart;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::{date_to_x, x_to_date, Axis, TickLocator};
pub use chart::{Figure, Panel, RenderOptions};
pub use diagram::{Band, Dash, Diagram, EdgeStyle, Legend, LegendEntry, NodeKind};
pub use error::{FigureError, Result};
pub use series::{LineSeries, Marker, RefLine};
pub use text::{HAlign, TextShaper, TextSpec, VAlign};
pub use theme::{parse_hex, with_alpha, Theme};
pub use types::{FigureSize, Insets};

/// Re-exported so callers can name colors without a direct skia dependency.
pub use skia_safe::Color;
