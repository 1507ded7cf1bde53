//! Contrato de Dataset: cursor secuencial sobre N filas de longitud fija.
//!
//! Invariantes:
//! - `read` avanza el cursor de forma monótona.
//! - `read` más allá del final devuelve `Ok(None)` (marcador de fin), nunca error.
//! - `reset` rebobina el cursor a la fila 0.
//! - `size` es constante durante la vida del handle.
//!
//! Los lectores concretos (HDF5, binarios Big-ANN, memoria) viven en
//! `knn-datasets`.

use std::fmt;

use thiserror::Error;

/// Cómo debe interpretarse un dataset al abrirlo (selecciona el miembro HDF5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Index,
    Query,
    Neighbors,
}

impl Context {
    /// Nombre del miembro en archivos ann-benchmarks.
    pub fn hdf5_member(&self) -> &'static str {
        match self {
            Context::Index => "train",
            Context::Query => "test",
            Context::Neighbors => "neighbors",
        }
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid dataset format: {0}")]
    Format(String),
    #[error("unsupported dataset format `{0}`")]
    UnsupportedFormat(String),
    #[error("dataset format `{format}` requires the `{feature}` cargo feature")]
    FeatureDisabled { format: String, feature: &'static str },
    #[error("expected {expected} rows, got {got}")]
    RowKind { expected: &'static str, got: &'static str },
}

/// Lote de filas devuelto por `Dataset::read`.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetRows {
    Vectors(Vec<Vec<f32>>),
    Ids(Vec<Vec<i64>>),
}

impl DatasetRows {
    pub fn len(&self) -> usize {
        match self {
            DatasetRows::Vectors(v) => v.len(),
            DatasetRows::Ids(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            DatasetRows::Vectors(_) => "vector",
            DatasetRows::Ids(_) => "id",
        }
    }

    pub fn into_vectors(self) -> Result<Vec<Vec<f32>>, DatasetError> {
        match self {
            DatasetRows::Vectors(v) => Ok(v),
            other => Err(DatasetError::RowKind { expected: "vector", got: other.kind() }),
        }
    }

    pub fn into_ids(self) -> Result<Vec<Vec<i64>>, DatasetError> {
        match self {
            DatasetRows::Ids(v) => Ok(v),
            other => Err(DatasetError::RowKind { expected: "id", got: other.kind() }),
        }
    }
}

pub trait Dataset: Send + fmt::Debug {
    /// Lee hasta `count` filas desde el cursor. `Ok(None)` cuando ya no quedan.
    fn read(&mut self, count: usize) -> Result<Option<DatasetRows>, DatasetError>;

    /// Rebobina el cursor al inicio.
    fn reset(&mut self) -> Result<(), DatasetError>;

    /// Número total de filas.
    fn size(&self) -> usize;
}

/// Abre un dataset a partir de su descriptor (formato + ruta).
pub trait DatasetOpener: Send + Sync {
    fn open(&self, format: &str, path: &str, context: Context) -> Result<Box<dyn Dataset>, DatasetError>;
}
