//! Formato ann-benchmarks (HDF5). Miembros: `train`, `test`, `neighbors`.
//!
//! El miembro seleccionado se carga completo al abrir; `read` recorre las
//! filas en memoria.

use knn_core::{Context, Dataset, DatasetError, DatasetRows};
use log::debug;

use crate::memory::InMemoryDataset;

#[derive(Debug)]
pub struct Hdf5Dataset {
    inner: InMemoryDataset,
}

fn h5_err(path: &str, e: hdf5::Error) -> DatasetError {
    DatasetError::Format(format!("{path}: {e}"))
}

impl Hdf5Dataset {
    pub fn open(path: &str, context: Context) -> Result<Self, DatasetError> {
        let file = hdf5::File::open(path).map_err(|e| h5_err(path, e))?;
        let member = context.hdf5_member();
        let data = file.dataset(member).map_err(|e| h5_err(path, e))?;
        let rows = match context {
            Context::Neighbors => {
                let arr = data.read_2d::<i32>().map_err(|e| h5_err(path, e))?;
                DatasetRows::Ids(arr.rows().into_iter().map(|r| r.iter().map(|v| i64::from(*v)).collect()).collect())
            }
            Context::Index | Context::Query => {
                let arr = data.read_2d::<f32>().map_err(|e| h5_err(path, e))?;
                DatasetRows::Vectors(arr.rows().into_iter().map(|r| r.to_vec()).collect())
            }
        };
        debug!("hdf5: loaded {path}:{member} rows={}", rows.len());
        Ok(Self { inner: InMemoryDataset::new(rows) })
    }
}

impl Dataset for Hdf5Dataset {
    fn read(&mut self, count: usize) -> Result<Option<DatasetRows>, DatasetError> {
        self.inner.read(count)
    }

    fn reset(&mut self) -> Result<(), DatasetError> {
        self.inner.reset()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }
}
