//! Valores por defecto de los parámetros reconocidos por los steps.
//!
//! Cambiar estos valores altera la semántica de configuraciones existentes
//! que omiten la clave correspondiente.

pub const DEFAULT_ENDPOINT: &str = "localhost";
/// Puerto cuando el endpoint es `localhost`.
pub const DEFAULT_LOCAL_PORT: i64 = 9200;
/// Puerto para cualquier otro endpoint.
pub const DEFAULT_REMOTE_PORT: i64 = 80;
/// Timeout de conexión del cliente, en segundos.
pub const DEFAULT_TIMEOUT_SECS: i64 = 60;
pub const DEFAULT_K: i64 = 100;
pub const DEFAULT_R: i64 = 1;
pub const DEFAULT_DATASET_FORMAT: &str = "hdf5";

/// Id centinela en filas de ground truth: "no hay vecino válido en este rank".
pub const SENTINEL_ID: i64 = -1;

/// Puerto por defecto según el endpoint resuelto.
pub fn default_port(endpoint: &str) -> i64 {
    if endpoint == DEFAULT_ENDPOINT {
        DEFAULT_LOCAL_PORT
    } else {
        DEFAULT_REMOTE_PORT
    }
}
