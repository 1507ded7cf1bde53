//! Contrato del cliente del servicio de búsqueda.
//!
//! El core sólo necesita emitir una request (body + campos excluidos) y recibir
//! los hits con el tiempo reportado por el servidor. El transporte concreto
//! vive en `knn-client`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::BoxError;

/// Respuesta cruda del servicio para una request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    /// Tiempo reportado por el servidor (ms).
    pub took: f64,
    /// Ids de documentos en el orden de relevancia del servicio.
    pub hits: Vec<String>,
}

/// Resultado de un trial de query tal como lo registra el step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Tiempo de servidor (ms). No incluye red ni serialización.
    pub took: f64,
    /// Tiempo de reloj alrededor de la llamada (ms), medido por el step.
    pub client_time: f64,
    /// Ids tal como los devuelve el servicio; se interpretan como enteros
    /// sólo al calcular recall.
    pub hits: Vec<String>,
}

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Emite una única búsqueda y espera su respuesta completa.
    async fn search(&self, index: &str, body: &Value, excluded_fields: &[String]) -> Result<SearchResponse, BoxError>;
}

/// Parámetros de conexión resueltos en la construcción del step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub endpoint: String,
    pub port: u16,
    /// Timeout por request, fijado una vez a nivel de conexión.
    pub timeout: Duration,
}

/// Construye clientes a partir de parámetros de conexión.
pub trait ClientFactory: Send + Sync {
    fn connect(&self, params: &ConnectionParams) -> Result<Arc<dyn SearchClient>, BoxError>;
}
