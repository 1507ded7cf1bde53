//! Contexto de ejecución explícito que se pasa a la construcción de steps.
//!
//! Reemplaza el estado global (cliente a nivel de módulo, configuración
//! ambiental): los colaboradores externos llegan siempre por aquí.

use std::fmt;
use std::sync::Arc;

use crate::dataset::DatasetOpener;
use crate::search::ClientFactory;

#[derive(Clone)]
pub struct ExecutionContext {
    pub datasets: Arc<dyn DatasetOpener>,
    pub clients: Arc<dyn ClientFactory>,
}

impl ExecutionContext {
    pub fn new(datasets: Arc<dyn DatasetOpener>, clients: Arc<dyn ClientFactory>) -> Self {
        Self { datasets, clients }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext").finish_non_exhaustive()
    }
}
