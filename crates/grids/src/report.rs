//! Rendering selection results for whoever asked for them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gt_core::{CellValue, GridView, TopKResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CellRecord<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonReport<T> {
    pub rows: usize,
    pub cols: usize,
    pub count: usize,
    pub cells: Vec<CellRecord<T>>,
}

impl<T: CellValue> JsonReport<T> {
    pub fn new<G: GridView<Value = T>>(grid: &G, result: &TopKResult<T>) -> Self {
        let cells: Vec<_> = result
            .iter()
            .map(|e| CellRecord { row: e.coord.row, col: e.coord.col, value: e.value })
            .collect();
        Self { rows: grid.rows(), cols: grid.cols(), count: cells.len(), cells }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("i/o error writing report: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Consumes a finished selection together with the grid it came from.
pub trait ResultSink {
    fn emit<G>(&mut self, grid: &G, result: &TopKResult<G::Value>) -> Result<(), SinkError>
    where
        G: GridView,
        G::Value: Serialize;
}

/// Writes the report as pretty JSON to a file, replacing it.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn emit<G>(&mut self, grid: &G, result: &TopKResult<G::Value>) -> Result<(), SinkError>
    where
        G: GridView,
        G::Value: Serialize,
    {
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &JsonReport::new(grid, result))?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Writes the report as a single JSON line to stdout.
#[derive(Default)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn emit<G>(&mut self, grid: &G, result: &TopKResult<G::Value>) -> Result<(), SinkError>
    where
        G: GridView,
        G::Value: Serialize,
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &JsonReport::new(grid, result))?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
