// File: crates/figure-core/src/error.rs
// Summary: Error type shared by the figure model and the PNG/PDF renderers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("invalid date literal '{input}'")]
    DateParse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid color literal '{0}' (expected #rrggbb)")]
    InvalidColor(String),
    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    UnknownNode { from: String, to: String, missing: String },
    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),
    #[error("panel ({row}, {col}) has no data to scale")]
    EmptyPanel { row: usize, col: usize },
    #[error("panel ({row}, {col}) is outside a {rows}x{cols} grid")]
    PanelOutOfRange { row: usize, col: usize, rows: usize, cols: usize },
    #[error("failed to create {0} surface")]
    Surface(&'static str),
    #[error("failed to encode {0}")]
    Encode(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FigureError>;
