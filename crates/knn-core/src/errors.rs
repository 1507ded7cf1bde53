//! Taxonomía de errores del core.
//!
//! - `Configuration`: tipo de step desconocido, parámetro requerido ausente o
//!   valor con tipo incorrecto. Se reporta antes de ejecutar cualquier trial.
//! - `Transport`: fallo del cliente de búsqueda; aborta la ejecución.
//! - `DegenerateRecall`: denominador cero en el evaluador de recall.
//!
//! Agotar un dataset NO es un error (ver `Dataset::read`).

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::step::StepStatus;

/// Error opaco de colaboradores externos (cliente, factories).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StepError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error at trial {trial}: {source}")]
    Transport { trial: usize, source: BoxError },
    #[error("recall is undefined: no query has true neighbors within k")]
    DegenerateRecall,
    #[error("dataset error: {0}")]
    Dataset(DatasetError),
    #[error("invalid step status transition {from:?} -> {to:?}")]
    Status { from: StepStatus, to: StepStatus },
    #[error("step `{label}` did not produce measure `{measure}`")]
    MissingMeasure { label: String, measure: String },
}

impl StepError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn transport(trial: usize, source: impl Into<BoxError>) -> Self {
        Self::Transport { trial, source: source.into() }
    }

    /// Indica si el error ocurrió antes de entrar en `Running`.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

// Formatos desconocidos o deshabilitados son errores de configuración del
// usuario; el resto (IO, cabeceras inválidas) se conserva como error de dataset.
impl From<DatasetError> for StepError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::UnsupportedFormat(_) | DatasetError::FeatureDisabled { .. } => Self::Configuration(err.to_string()),
            other => Self::Dataset(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_reports_trial_and_cause() {
        let err = StepError::transport(7, "connection refused");
        assert_eq!(err.to_string(), "transport error at trial 7: connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unsupported_format_becomes_configuration() {
        let err: StepError = DatasetError::UnsupportedFormat("parquet".into()).into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("parquet"));
    }

    #[test]
    fn io_failure_stays_dataset_error() {
        let err: StepError = DatasetError::Io(std::io::Error::other("disk gone")).into();
        assert!(matches!(err, StepError::Dataset(DatasetError::Io(_))));
    }
}
