//! Resolución de descriptores de dataset (`formato`, `ruta`, `contexto`).
//!
//! Formatos reconocidos:
//! - `hdf5`: ann-benchmarks, miembro según el `Context`. Requiere la feature `hdf5`.
//! - `bigann`: binarios big-ann; vectores por extensión, vecinos siempre `ibin`.

use std::path::Path;

use knn_core::{Context, Dataset, DatasetError, DatasetOpener};
use log::debug;

use crate::bigann::{BigAnnDataset, Element};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileDatasetOpener;

impl FileDatasetOpener {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetOpener for FileDatasetOpener {
    fn open(&self, format: &str, path: &str, context: Context) -> Result<Box<dyn Dataset>, DatasetError> {
        debug!("opener: format={format} path={path} context={context:?}");
        match format {
            "hdf5" => open_hdf5(path, context),
            "bigann" => {
                let element = match context {
                    Context::Neighbors => Element::I32,
                    Context::Index | Context::Query => match Element::from_path(Path::new(path))? {
                        Element::I32 => return Err(DatasetError::Format(format!("{path}: ibin files hold neighbor ids, not vectors"))),
                        e => e,
                    },
                };
                Ok(Box::new(BigAnnDataset::open(path, element)?))
            }
            other => Err(DatasetError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(feature = "hdf5")]
fn open_hdf5(path: &str, context: Context) -> Result<Box<dyn Dataset>, DatasetError> {
    Ok(Box::new(crate::ann_hdf5::Hdf5Dataset::open(path, context)?))
}

#[cfg(not(feature = "hdf5"))]
fn open_hdf5(_path: &str, _context: Context) -> Result<Box<dyn Dataset>, DatasetError> {
    Err(DatasetError::FeatureDisabled { format: "hdf5".into(),
                                        feature: "hdf5" })
}
