//! Concrete grids and the boundary around the selection core: where grids
//! come from and where results go.

use gt_core::SelectError;

pub mod dense;
pub mod report;
pub mod source;
pub mod sparse;
pub mod synth;

pub use dense::DenseGrid;
pub use report::{CellRecord, JsonFileSink, JsonReport, ResultSink, SinkError, StdoutSink};
pub use source::{GridDocument, GridId, GridSource, JsonGridFile, LoadedGrid};
pub use sparse::SparseGrid;
pub use synth::SyntheticGrid;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed grid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid shape: {0}")]
    Shape(#[from] SelectError),
    #[error("unrecognized grid identifier `{0}`")]
    UnknownIdentifier(String),
}
