//! Where grids come from: JSON documents on disk and `random:` identifiers.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rand::distributions::uniform::SampleUniform;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use gt_core::{CellValue, GridView, Result as CoreResult};

use crate::report::CellRecord;
use crate::{DecodeError, DenseGrid, SparseGrid, SyntheticGrid};

/// Produces a grid from something outside the selection core.
pub trait GridSource {
    type Grid: GridView;

    fn load(&self) -> Result<Self::Grid, DecodeError>;
}

/// On-disk grid description, tagged by `layout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum GridDocument<T> {
    Dense {
        rows: usize,
        cols: usize,
        cells: Vec<T>,
    },
    Sparse {
        #[serde(default)]
        rows: Option<usize>,
        #[serde(default)]
        cols: Option<usize>,
        cells: Vec<CellRecord<T>>,
    },
}

impl<T: CellValue + DeserializeOwned> GridDocument<T> {
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl<T: CellValue> GridDocument<T> {
    pub fn into_grid(self) -> CoreResult<LoadedGrid<T>> {
        match self {
            GridDocument::Dense { rows, cols, cells } => {
                Ok(LoadedGrid::Dense(DenseGrid::new(rows, cols, cells)?))
            }
            GridDocument::Sparse { rows, cols, cells } => {
                let cells = cells.into_iter().map(|c| (c.row, c.col, c.value)).collect();
                Ok(LoadedGrid::Sparse(SparseGrid::with_optional_bounds(rows, cols, cells)?))
            }
        }
    }
}

/// Either concrete grid, as read from a document.
#[derive(Debug, Clone)]
pub enum LoadedGrid<T> {
    Dense(DenseGrid<T>),
    Sparse(SparseGrid<T>),
}

impl<T: CellValue> GridView for LoadedGrid<T> {
    type Value = T;

    fn rows(&self) -> usize {
        match self {
            LoadedGrid::Dense(g) => g.rows(),
            LoadedGrid::Sparse(g) => g.rows(),
        }
    }

    fn cols(&self) -> usize {
        match self {
            LoadedGrid::Dense(g) => g.cols(),
            LoadedGrid::Sparse(g) => g.cols(),
        }
    }

    fn value_at(&self, row: usize, col: usize) -> CoreResult<T> {
        match self {
            LoadedGrid::Dense(g) => g.value_at(row, col),
            LoadedGrid::Sparse(g) => g.value_at(row, col),
        }
    }
}

/// A `GridDocument` stored as JSON at `path`.
pub struct JsonGridFile<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonGridFile<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), _value: PhantomData }
    }
}

impl<T: CellValue + DeserializeOwned> GridSource for JsonGridFile<T> {
    type Grid = LoadedGrid<T>;

    fn load(&self) -> Result<LoadedGrid<T>, DecodeError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(GridDocument::<T>::parse(&text)?.into_grid()?)
    }
}

/// Names a grid on the command line: a JSON file path, or
/// `random:<rows>x<cols>[:<seed>]` for a synthetic dense grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridId {
    File(PathBuf),
    Random { rows: usize, cols: usize, seed: u64 },
}

impl GridId {
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DecodeError::UnknownIdentifier(raw.to_string()));
        }
        let Some(rest) = raw.strip_prefix("random:") else {
            return Ok(GridId::File(PathBuf::from(raw)));
        };

        let unknown = || DecodeError::UnknownIdentifier(raw.to_string());
        let (dims, seed) = match rest.split_once(':') {
            Some((dims, seed)) => (dims, seed.parse::<u64>().map_err(|_| unknown())?),
            None => (rest, 0),
        };
        let (rows, cols) = dims.split_once('x').ok_or_else(unknown)?;
        Ok(GridId::Random {
            rows: rows.parse().map_err(|_| unknown())?,
            cols: cols.parse().map_err(|_| unknown())?,
            seed,
        })
    }

    /// Loads the grid; synthetic values are drawn from `[ZERO, random_max]`.
    pub fn open<T>(&self, random_max: T) -> Result<LoadedGrid<T>, DecodeError>
    where
        T: CellValue + DeserializeOwned + SampleUniform,
    {
        match self {
            GridId::File(path) => JsonGridFile::<T>::new(path).load(),
            GridId::Random { rows, cols, seed } => {
                let synth = SyntheticGrid::new(*rows, *cols, T::ZERO, random_max).with_seed(*seed);
                Ok(LoadedGrid::Dense(synth.load()?))
            }
        }
    }
}

impl std::str::FromStr for GridId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
