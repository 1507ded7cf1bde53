use async_trait::async_trait;
use log::{info, warn};

use super::{Measures, StepResult, StepStatus};
use crate::errors::StepError;

/// Trait que define un Step de benchmark.
///
/// Implementadores escriben `action`; `execute` (provisto) aplica la máquina
/// de estados y valida que se produzcan todas las medidas declaradas.
#[async_trait]
pub trait Step: Send {
    /// Identificador del tipo de step (clave en el registro).
    fn label(&self) -> &str;

    /// Medidas que `action` debe producir.
    fn measures(&self) -> Vec<String>;

    fn status(&self) -> StepStatus;

    fn status_mut(&mut self) -> &mut StepStatus;

    /// Unidad de trabajo medida.
    async fn action(&mut self) -> Result<Measures, StepError>;

    async fn execute(&mut self) -> Result<StepResult, StepError> {
        self.status_mut().advance(StepStatus::Running)?;
        info!("step `{}` running", self.label());
        let outcome = match self.action().await {
            Ok(measures) => check_measures(self.label(), &self.measures(), measures),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(measures) => {
                self.status_mut().advance(StepStatus::Completed)?;
                info!("step `{}` completed ({} measures)", self.label(), measures.len());
                Ok(StepResult { label: self.label().to_string(),
                                measures })
            }
            Err(e) => {
                self.status_mut().advance(StepStatus::Failed)?;
                warn!("step `{}` failed: {e}", self.label());
                Err(e)
            }
        }
    }
}

fn check_measures(label: &str, declared: &[String], measures: Measures) -> Result<Measures, StepError> {
    match declared.iter().find(|m| !measures.contains_key(m.as_str())) {
        Some(missing) => Err(StepError::MissingMeasure { label: label.to_string(),
                                                         measure: missing.clone() }),
        None => Ok(measures),
    }
}
