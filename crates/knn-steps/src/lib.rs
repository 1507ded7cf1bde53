//! knn-steps: steps concretos del benchmark y el registro por defecto.

pub mod steps;

use knn_core::{Step, StepError, StepRegistry};

pub use steps::query::QueryStep;

/// Registro con todos los tipos de step incluidos en el crate.
pub fn default_registry() -> Result<StepRegistry, StepError> {
    let mut registry = StepRegistry::new();
    register_builtin(&mut registry)?;
    Ok(registry)
}

/// Registra los steps incluidos en un registro existente.
pub fn register_builtin(registry: &mut StepRegistry) -> Result<(), StepError> {
    registry.register(QueryStep::LABEL, |config, ctx| {
                 QueryStep::from_config(config, ctx).map(|step| Box::new(step) as Box<dyn Step>)
             })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_knows_query() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.labels(), vec!["query"]);
    }

    #[test]
    fn builtin_cannot_be_registered_twice() {
        let mut registry = default_registry().unwrap();
        assert!(register_builtin(&mut registry).unwrap_err().is_configuration());
    }
}
