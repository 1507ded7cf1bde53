use serde::Serialize;

use crate::errors::StepError;

/// Estado de un Step en tiempo de ejecución.
///
/// Las transiciones válidas son:
/// - `Initialized` -> `Running`
/// - `Running` -> `Completed`
/// - `Running` -> `Failed`
///
/// `Completed` y `Failed` son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StepStatus {
    /// Construido, parámetros resueltos; aún no ejecutado.
    #[default]
    Initialized,
    /// Ejecutando trials.
    Running,
    /// Finalizó correctamente.
    Completed,
    /// Abortado por el primer error irrecuperable.
    Failed,
}

impl StepStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed)
    }

    pub fn can_transition(self, to: StepStatus) -> bool {
        matches!((self, to),
                 (StepStatus::Initialized, StepStatus::Running) | (StepStatus::Running, StepStatus::Completed) | (StepStatus::Running, StepStatus::Failed))
    }

    /// Avanza in-place o devuelve `StepError::Status` si el salto no es válido.
    pub fn advance(&mut self, to: StepStatus) -> Result<(), StepError> {
        if !self.can_transition(to) {
            return Err(StepError::Status { from: *self, to });
        }
        *self = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions() {
        let mut s = StepStatus::default();
        assert_eq!(s, StepStatus::Initialized);
        s.advance(StepStatus::Running).unwrap();
        s.advance(StepStatus::Completed).unwrap();
        assert!(s.is_terminal());
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [StepStatus::Completed, StepStatus::Failed] {
            for to in [StepStatus::Initialized, StepStatus::Running, StepStatus::Completed, StepStatus::Failed] {
                let mut s = terminal;
                assert!(s.advance(to).is_err(), "{terminal:?} -> {to:?} should be rejected");
            }
        }
    }

    #[test]
    fn cannot_skip_running() {
        let mut s = StepStatus::Initialized;
        assert!(matches!(s.advance(StepStatus::Completed), Err(StepError::Status { .. })));
        assert_eq!(s, StepStatus::Initialized);
    }
}
