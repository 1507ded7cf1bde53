//! Cliente `_search` sobre HTTP.
//!
//! Una request por llamada: `POST /{index}/_search` con el body JSON y
//! `_source_excludes` como query string. El timeout se fija una vez al
//! construir el cliente.

use std::sync::Arc;

use async_trait::async_trait;
use knn_core::{BoxError, ClientFactory, ConnectionParams, SearchClient, SearchResponse};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    took: f64,
    hits: RawHits,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenSearchClient {
    pub fn new(params: &ConnectionParams) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(params.timeout).build()?;
        Ok(Self { http,
                  base_url: format!("http://{}:{}", params.endpoint, params.port) })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search_index(&self, index: &str, body: &Value, excluded_fields: &[String]) -> Result<SearchResponse, ClientError> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let mut request = self.http.post(&url).json(body);
        if !excluded_fields.is_empty() {
            request = request.query(&[("_source_excludes", excluded_fields.join(","))]);
        }
        debug!("search: POST {url}");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status: status.as_u16(),
                                             body });
        }
        let raw: RawSearchResponse = response.json().await?;
        debug!("search: took={}ms hits={}", raw.took, raw.hits.hits.len());
        Ok(SearchResponse { took: raw.took,
                            hits: raw.hits.hits.into_iter().map(|h| h.id).collect() })
    }
}

#[async_trait]
impl SearchClient for OpenSearchClient {
    async fn search(&self, index: &str, body: &Value, excluded_fields: &[String]) -> Result<SearchResponse, BoxError> {
        Ok(self.search_index(index, body, excluded_fields).await?)
    }
}

/// Factory instalada en el `ExecutionContext` del binario.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSearchClientFactory;

impl ClientFactory for OpenSearchClientFactory {
    fn connect(&self, params: &ConnectionParams) -> Result<Arc<dyn SearchClient>, BoxError> {
        Ok(Arc::new(OpenSearchClient::new(params)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn base_url_uses_endpoint_and_port() {
        let client = OpenSearchClient::new(&ConnectionParams { endpoint: "search.internal".into(),
                                                               port: 9201,
                                                               timeout: Duration::from_secs(5) }).unwrap();
        assert_eq!(client.base_url(), "http://search.internal:9201");
    }

    #[test]
    fn raw_response_keeps_hit_order() {
        let raw: RawSearchResponse = serde_json::from_str(r#"{"took": 4, "hits": {"total": 2, "hits": [{"_id": "7"}, {"_id": "3"}]}}"#).unwrap();
        assert_eq!(raw.took, 4.0);
        let ids: Vec<_> = raw.hits.hits.into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["7", "3"]);
    }
}
