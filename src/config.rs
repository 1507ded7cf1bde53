//! Defaults de entorno para los steps.
//! Carga `.env` una sola vez y expone `KNNPERF_ENDPOINT` / `KNNPERF_PORT`
//! como `implicit_config` común a todos los steps de un test.

use std::env;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

pub const ENDPOINT_VAR: &str = "KNNPERF_ENDPOINT";
pub const PORT_VAR: &str = "KNNPERF_PORT";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Defaults del entorno, evaluados una sola vez.
pub static ENV_DEFAULTS: Lazy<EnvDefaults> = Lazy::new(EnvDefaults::from_env);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub endpoint: Option<String>,
    pub port: Option<u16>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye desde una función de lookup (tests sin tocar el entorno del proceso).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let endpoint = lookup(ENDPOINT_VAR).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let port = lookup(PORT_VAR).and_then(|v| match v.trim().parse::<u16>() {
                                       Ok(p) => Some(p),
                                       Err(e) => {
                                           warn!("ignoring {PORT_VAR}={v}: {e}");
                                           None
                                       }
                                   });
        Self { endpoint, port }
    }

    pub fn to_implicit(&self) -> Map<String, Value> {
        let mut out = Map::new();
        if let Some(endpoint) = &self.endpoint {
            out.insert("endpoint".into(), Value::from(endpoint.clone()));
        }
        if let Some(port) = self.port {
            out.insert("port".into(), Value::from(port));
        }
        out
    }
}

/// Forzar carga temprana de .env desde el binario.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
