//! Errores de la aplicación (carga de tests, ejecución, reporte).

pub mod perf_error;

pub use perf_error::PerfError;
