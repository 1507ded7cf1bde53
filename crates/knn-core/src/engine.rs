//! Engine secuencial de steps.
//!
//! Construye todos los steps primero (los errores de configuración aparecen
//! antes de ejecutar cualquier trial) y luego los ejecuta en orden, uno a la
//! vez. Se detiene en el primer fallo (stop-on-failure).

use log::info;

use crate::context::ExecutionContext;
use crate::errors::StepError;
use crate::params::StepConfig;
use crate::registry::StepRegistry;
use crate::step::{Step, StepResult};

#[derive(Debug)]
pub struct StepEngine {
    registry: StepRegistry,
    context: ExecutionContext,
}

impl StepEngine {
    pub fn new(registry: StepRegistry, context: ExecutionContext) -> Self {
        Self { registry, context }
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Construye los steps en orden sin ejecutarlos.
    pub fn build(&self, configs: &[StepConfig]) -> Result<Vec<Box<dyn Step>>, StepError> {
        configs.iter().map(|c| self.registry.create(c, &self.context)).collect()
    }

    /// Construye y ejecuta `configs` en orden.
    pub async fn run(&self, configs: &[StepConfig]) -> Result<Vec<StepResult>, StepError> {
        let mut steps = self.build(configs)?;
        let mut results = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter_mut().enumerate() {
            info!("engine: step {}/{} `{}`", i + 1, configs.len(), step.label());
            results.push(step.execute().await?);
        }
        Ok(results)
    }
}
