//! Ejecución de un test completo.
//!
//! 1. Valida que todo tipo de step esté registrado (antes de cualquier trial).
//! 2. Ejecuta `setup` una vez; sus resultados se descartan.
//! 3. Ejecuta `steps` `num_runs` veces, construyendo steps nuevos por run.

use chrono::Utc;
use knn_core::{StepConfig, StepEngine, StepError};
use log::info;
use uuid::Uuid;

use crate::config::EnvDefaults;
use crate::errors::PerfError;
use crate::report::{summarize, TestReport};
use crate::testfile::TestConfig;

#[derive(Debug)]
pub struct TestRunner {
    engine: StepEngine,
    env: EnvDefaults,
}

impl TestRunner {
    pub fn new(engine: StepEngine, env: EnvDefaults) -> Self {
        Self { engine, env }
    }

    fn check_kinds<'a>(&self, configs: impl IntoIterator<Item = &'a StepConfig>) -> Result<(), StepError> {
        match configs.into_iter().find(|c| !self.engine.registry().contains(c.step_name())) {
            Some(unknown) => Err(StepError::configuration(format!("invalid step `{}`", unknown.step_name()))),
            None => Ok(()),
        }
    }

    pub async fn run(&self, test: &TestConfig) -> Result<TestReport, PerfError> {
        let setup = test.setup_configs(&self.env)?;
        let steps = test.step_configs(&self.env)?;
        self.check_kinds(setup.iter().chain(steps.iter()))?;

        let test_id = test.test_id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let started_at = Utc::now();
        info!("test `{}` ({test_id}): {} setup steps, {} steps x {} runs",
              test.test_name,
              setup.len(),
              steps.len(),
              test.num_runs);

        if !setup.is_empty() {
            self.engine.run(&setup).await?;
        }
        let mut runs = Vec::with_capacity(test.num_runs);
        for run in 0..test.num_runs {
            info!("run {}/{}", run + 1, test.num_runs);
            runs.push(self.engine.run(&steps).await?);
        }

        let summary = summarize(&steps, &runs);
        Ok(TestReport { test_name: test.test_name.clone(),
                        test_id,
                        started_at,
                        finished_at: Utc::now(),
                        num_runs: test.num_runs,
                        steps: summary,
                        runs: test.show_runs.then_some(runs) })
    }
}
