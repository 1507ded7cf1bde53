//! knnperf: herramienta de benchmark k-NN.
//!
//! La librería raíz agrupa lo que el binario necesita además del core:
//! - `testfile`: archivo de test YAML y conversión a `StepConfig`.
//! - `config`: defaults de entorno (`.env`).
//! - `runner`: setup + `num_runs` ejecuciones de los steps.
//! - `report`: agregación (media, percentiles) y salida JSON.

pub mod config;
pub mod errors;
pub mod hashing;
pub mod report;
pub mod runner;
pub mod testfile;

pub use errors::PerfError;
pub use report::TestReport;
pub use runner::TestRunner;
pub use testfile::TestConfig;
