//! knn-datasets: lectores de datasets para el benchmark.
//!
//! Implementan el contrato `knn_core::Dataset`:
//! - `InMemoryDataset`: filas en memoria (tests, uso programático).
//! - `BigAnnDataset`: binarios de big-ann-benchmarks (`fbin`, `u8bin`, `ibin`).
//! - `Hdf5Dataset`: formato ann-benchmarks (feature `hdf5`).
//!
//! `FileDatasetOpener` resuelve `formato + ruta + contexto` al lector adecuado.

pub mod bigann;
#[cfg(feature = "hdf5")]
pub mod ann_hdf5;
pub mod memory;
pub mod opener;

pub use bigann::{BigAnnDataset, Element};
pub use memory::InMemoryDataset;
pub use opener::FileDatasetOpener;
