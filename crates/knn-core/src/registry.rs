//! Registro / factory de tipos de step.
//!
//! Mapea la etiqueta de un tipo de step a su constructor. Nuevos tipos se
//! registran bajo una etiqueta única sin modificar los existentes.

use std::collections::BTreeMap;
use std::fmt;

use crate::context::ExecutionContext;
use crate::errors::StepError;
use crate::params::StepConfig;
use crate::step::Step;

/// Constructor de un step a partir de su configuración y el contexto.
pub type StepConstructor = Box<dyn Fn(&StepConfig, &ExecutionContext) -> Result<Box<dyn Step>, StepError> + Send + Sync>;

#[derive(Default)]
pub struct StepRegistry {
    constructors: BTreeMap<String, StepConstructor>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un tipo de step. Una etiqueta repetida es un error de configuración.
    pub fn register<F>(&mut self, label: impl Into<String>, constructor: F) -> Result<(), StepError>
        where F: Fn(&StepConfig, &ExecutionContext) -> Result<Box<dyn Step>, StepError> + Send + Sync + 'static
    {
        let label = label.into();
        if self.constructors.contains_key(&label) {
            return Err(StepError::configuration(format!("step kind `{label}` is already registered")));
        }
        self.constructors.insert(label, Box::new(constructor));
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.constructors.contains_key(label)
    }

    /// Etiquetas registradas, en orden alfabético.
    pub fn labels(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Construye el step indicado por `config.step_name()`.
    pub fn create(&self, config: &StepConfig, ctx: &ExecutionContext) -> Result<Box<dyn Step>, StepError> {
        let constructor = self.constructors
                              .get(config.step_name())
                              .ok_or_else(|| StepError::configuration(format!("invalid step `{}`", config.step_name())))?;
        constructor(config, ctx)
    }
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRegistry").field("labels", &self.labels()).finish()
    }
}
