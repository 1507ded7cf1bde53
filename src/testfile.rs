//! Archivo de test YAML.
//!
//! ```yaml
//! endpoint: localhost        # opcional, implicit_config de todos los steps
//! test_name: sift-128
//! test_id: run-1             # opcional, uuid si falta
//! num_runs: 3
//! show_runs: false
//! setup: []
//! steps:
//!   - name: query            # tipo de step
//!     index_name: target_index
//!     field_name: target_field
//!     k: 100
//! ```

use std::path::Path;

use knn_core::StepConfig;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::EnvDefaults;
use crate::errors::PerfError;

fn default_num_runs() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    pub test_name: String,
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default = "default_num_runs")]
    pub num_runs: usize,
    #[serde(default)]
    pub show_runs: bool,
    #[serde(default)]
    pub setup: Vec<Map<String, Value>>,
    #[serde(default)]
    pub steps: Vec<Map<String, Value>>,
}

impl TestConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PerfError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, PerfError> {
        let test: TestConfig = serde_yaml::from_str(text)?;
        test.validate()?;
        Ok(test)
    }

    fn validate(&self) -> Result<(), PerfError> {
        if self.num_runs == 0 {
            return Err(PerfError::config(format!("test `{}`: num_runs must be >= 1", self.test_name)));
        }
        if self.steps.is_empty() {
            return Err(PerfError::config(format!("test `{}` has no steps", self.test_name)));
        }
        Ok(())
    }

    /// Defaults comunes: entorno, luego `endpoint` / `port` del test.
    pub fn implicit_config(&self, env: &EnvDefaults) -> Map<String, Value> {
        let mut implicit = env.to_implicit();
        if let Some(endpoint) = &self.endpoint {
            implicit.insert("endpoint".into(), Value::from(endpoint.clone()));
        }
        if let Some(port) = self.port {
            implicit.insert("port".into(), Value::from(port));
        }
        implicit
    }

    pub fn setup_configs(&self, env: &EnvDefaults) -> Result<Vec<StepConfig>, PerfError> {
        to_step_configs("setup", &self.setup, &self.implicit_config(env))
    }

    pub fn step_configs(&self, env: &EnvDefaults) -> Result<Vec<StepConfig>, PerfError> {
        to_step_configs("steps", &self.steps, &self.implicit_config(env))
    }
}

fn to_step_configs(section: &str, entries: &[Map<String, Value>], implicit: &Map<String, Value>) -> Result<Vec<StepConfig>, PerfError> {
    entries.iter()
           .enumerate()
           .map(|(i, entry)| {
               let mut config = entry.clone();
               let name = match config.remove("name") {
                   Some(Value::String(name)) => name,
                   _ => return Err(PerfError::config(format!("{section}[{i}] needs a string `name`"))),
               };
               Ok(StepConfig::new(name, config, implicit.clone()))
           })
           .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const YAML: &str = r#"
endpoint: search.internal
test_name: sift
num_runs: 2
steps:
  - name: query
    index_name: target_index
    field_name: target_field
    k: 10
    calculate_recall: true
"#;

    #[test]
    fn parses_defaults_and_steps() {
        let test = TestConfig::from_yaml(YAML).unwrap();
        assert_eq!(test.num_runs, 2);
        assert!(!test.show_runs);
        assert!(test.test_id.is_none());
        assert!(test.setup.is_empty());

        let configs = test.step_configs(&EnvDefaults::default()).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].step_name(), "query");
        assert!(configs[0].config().get("name").is_none());
        assert_eq!(configs[0].int("k", None).unwrap(), 10);
        assert!(configs[0].bool("calculate_recall", None).unwrap());
        assert_eq!(configs[0].string("endpoint", None).unwrap(), "search.internal");
    }

    #[test]
    fn test_level_connection_overrides_environment() {
        let test = TestConfig::from_yaml(YAML).unwrap();
        let env = EnvDefaults { endpoint: Some("from-env".into()),
                                port: Some(9400) };
        assert_eq!(Value::Object(test.implicit_config(&env)), json!({"endpoint": "search.internal", "port": 9400}));
    }

    #[test]
    fn step_without_name_is_rejected() {
        let test = TestConfig::from_yaml("test_name: t\nsteps:\n  - k: 3\n").unwrap();
        let err = test.step_configs(&EnvDefaults::default()).unwrap_err();
        assert!(err.to_string().contains("steps[0]"));
    }

    #[test]
    fn zero_runs_and_empty_steps_are_rejected() {
        assert!(matches!(TestConfig::from_yaml("test_name: t\nnum_runs: 0\nsteps:\n  - name: query\n"), Err(PerfError::Config(_))));
        assert!(matches!(TestConfig::from_yaml("test_name: t\n"), Err(PerfError::Config(_))));
        assert!(matches!(TestConfig::from_yaml("steps: [\n"), Err(PerfError::Yaml(_))));
    }
}
