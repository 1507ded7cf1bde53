//! Configuración de steps y resolución de parámetros.
//!
//! Regla única de resolución, aplicada por todos los steps:
//! `config` (valores del usuario) -> `implicit_config` (defaults de una etapa
//! previa del pipeline) -> default suministrado por el step.
//!
//! Una clave presente con valor `null` cuenta como ausente. Una clave presente
//! con tipo incorrecto es un `StepError::Configuration` que nombra la clave.

use serde_json::{Map, Value};

use crate::errors::StepError;

/// Bolsa inmutable de parámetros asociada a un tipo de step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepConfig {
    step_name: String,
    config: Map<String, Value>,
    implicit_config: Map<String, Value>,
}

impl StepConfig {
    pub fn new(step_name: impl Into<String>, config: Map<String, Value>, implicit_config: Map<String, Value>) -> Self {
        Self { step_name: step_name.into(),
               config,
               implicit_config }
    }

    /// Construye desde valores JSON arbitrarios; ambos deben ser objetos (o `null`).
    pub fn from_values(step_name: impl Into<String>, config: Value, implicit_config: Value) -> Result<Self, StepError> {
        let step_name = step_name.into();
        let config = into_object(&step_name, "config", config)?;
        let implicit_config = into_object(&step_name, "implicit config", implicit_config)?;
        Ok(Self::new(step_name, config, implicit_config))
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn implicit_config(&self) -> &Map<String, Value> {
        &self.implicit_config
    }

    /// Vista efectiva (implicit sobrescrito por config). Útil para reportes.
    pub fn effective(&self) -> Value {
        merge_json(&Value::Object(self.implicit_config.clone()), &Value::Object(self.config.clone()))
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        [&self.config, &self.implicit_config].into_iter()
                                              .filter_map(|m| m.get(key))
                                              .find(|v| !v.is_null())
    }

    fn resolve<T>(&self,
                  key: &str,
                  expected: &str,
                  default: Option<T>,
                  convert: impl Fn(&Value) -> Option<T>)
                  -> Result<T, StepError> {
        match self.lookup(key) {
            Some(v) => convert(v).ok_or_else(|| StepError::configuration(format!("invalid type for `{key}` in step `{}`: expected {expected}, got {v}", self.step_name))),
            None => default.ok_or_else(|| StepError::configuration(format!("`{key}` must be set for step `{}`", self.step_name))),
        }
    }

    pub fn string(&self, key: &str, default: Option<&str>) -> Result<String, StepError> {
        self.resolve(key, "string", default.map(str::to_string), |v| v.as_str().map(str::to_string))
    }

    /// Parámetro marcado como opcional: ausente (sin default) es `Ok(None)`.
    pub fn optional_string(&self, key: &str) -> Result<Option<String>, StepError> {
        match self.lookup(key) {
            Some(_) => self.string(key, None).map(Some),
            None => Ok(None),
        }
    }

    /// Enteros JSON; flotantes y booleanos se rechazan.
    pub fn int(&self, key: &str, default: Option<i64>) -> Result<i64, StepError> {
        self.resolve(key, "integer", default, Value::as_i64)
    }

    pub fn bool(&self, key: &str, default: Option<bool>) -> Result<bool, StepError> {
        self.resolve(key, "boolean", default, Value::as_bool)
    }
}

fn into_object(step_name: &str, what: &str, value: Value) -> Result<Map<String, Value>, StepError> {
    match value {
        Value::Object(m) => Ok(m),
        Value::Null => Ok(Map::new()),
        other => Err(StepError::configuration(format!("{what} for step `{step_name}` must be a mapping, got {other}"))),
    }
}

/// Merge shallow: keys from `b` override keys from `a` when both are objects.
/// Cuando alguno de los dos valores no es objeto, `b` tiene precedencia.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg(config: Value, implicit: Value) -> StepConfig {
        StepConfig::from_values("query", config, implicit).expect("valid config")
    }

    #[test]
    fn explicit_wins_over_implicit_and_default() {
        let c = cfg(json!({"endpoint": "es.local"}), json!({"endpoint": "other"}));
        assert_eq!(c.string("endpoint", Some("localhost")).unwrap(), "es.local");
    }

    #[test]
    fn implicit_used_when_explicit_absent() {
        let c = cfg(json!({}), json!({"port": 9201}));
        assert_eq!(c.int("port", Some(80)).unwrap(), 9201);
    }

    #[test]
    fn null_counts_as_absent() {
        let c = cfg(json!({"k": null}), json!({"k": 10}));
        assert_eq!(c.int("k", Some(100)).unwrap(), 10);
        let c = cfg(json!({"k": null}), json!({}));
        assert_eq!(c.int("k", Some(100)).unwrap(), 100);
    }

    #[test]
    fn wrong_type_names_the_key() {
        let c = cfg(json!({"k": "ten"}), json!({}));
        let err = c.int("k", Some(100)).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("`k`"));

        let c = cfg(json!({"k": 2.5}), json!({}));
        assert!(c.int("k", Some(100)).is_err());

        let c = cfg(json!({}), json!({"calculate_recall": "yes"}));
        assert!(c.bool("calculate_recall", Some(false)).is_err());
    }

    #[test]
    fn missing_required_is_configuration_error() {
        let c = cfg(json!({}), json!({}));
        let err = c.string("index_name", None).unwrap_err();
        assert_eq!(err.to_string(), "configuration error: `index_name` must be set for step `query`");
    }

    #[test]
    fn optional_string_absent_is_none() {
        let c = cfg(json!({"neighbors_path": "gt.ibin"}), json!({}));
        assert_eq!(c.optional_string("dataset_path").unwrap(), None);
        assert_eq!(c.optional_string("neighbors_path").unwrap().as_deref(), Some("gt.ibin"));
        let c = cfg(json!({"dataset_path": 3}), json!({}));
        assert!(c.optional_string("dataset_path").is_err());
    }

    #[test]
    fn non_object_config_rejected() {
        let err = StepConfig::from_values("query", json!([1, 2]), Value::Null).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn effective_view_merges_layers() {
        let c = cfg(json!({"k": 5}), json!({"k": 1, "endpoint": "h"}));
        assert_eq!(c.effective(), json!({"k": 5, "endpoint": "h"}));
    }
}
