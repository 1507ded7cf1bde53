//! QueryStep: benchmark de búsquedas k-NN.
//!
//! Construcción: resuelve conexión, parámetros de la query y descriptores de
//! dataset. El dataset de vecinos sólo se abre cuando `calculate_recall` es
//! verdadero.
//!
//! Ejecución: una request por vector de query, estrictamente secuencial
//! (cada request se espera antes de emitir la siguiente). Se registran
//! `took` (servidor), `client_time` (reloj alrededor de la llamada) y
//! `memory_kb` por trial; con recall, `recall@K` y `recall@{r}`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use knn_core::constants::{default_port, DEFAULT_DATASET_FORMAT, DEFAULT_ENDPOINT, DEFAULT_K, DEFAULT_R, DEFAULT_TIMEOUT_SECS};
use knn_core::{recall_at_r, ConnectionParams, Context, Dataset, ExecutionContext, MeasureValue, Measures, QueryResult,
               SearchClient, Step, StepConfig, StepError, StepStatus};
use log::{debug, warn};
use serde_json::{json, Map, Value};

pub struct QueryStep {
    status: StepStatus,
    client: Arc<dyn SearchClient>,
    connection: ConnectionParams,
    k: usize,
    r: usize,
    index_name: String,
    field_name: String,
    calculate_recall: bool,
    dataset: Box<dyn Dataset>,
    neighbors: Option<Box<dyn Dataset>>,
    query_count: usize,
}

impl QueryStep {
    pub const LABEL: &'static str = "query";

    pub fn from_config(config: &StepConfig, ctx: &ExecutionContext) -> Result<Self, StepError> {
        let name = config.step_name();
        let endpoint = config.string("endpoint", Some(DEFAULT_ENDPOINT))?;
        let port = config.int("port", Some(default_port(&endpoint)))?;
        let port = u16::try_from(port).map_err(|_| StepError::configuration(format!("`port` out of range for step `{name}`: {port}")))?;
        let timeout = positive(config, "timeout", DEFAULT_TIMEOUT_SECS)?;
        let k = positive(config, "k", DEFAULT_K)?;
        let r = positive(config, "r", DEFAULT_R)?;
        let index_name = config.string("index_name", None)?;
        let field_name = config.string("field_name", None)?;
        let calculate_recall = config.bool("calculate_recall", Some(false))?;
        let dataset_format = config.string("dataset_format", Some(DEFAULT_DATASET_FORMAT))?;
        let dataset_path = config.string("dataset_path", None)?;
        let neighbors_format = config.string("neighbors_format", Some(DEFAULT_DATASET_FORMAT))?;
        let neighbors_path = config.optional_string("neighbors_path")?;

        let dataset = ctx.datasets.open(&dataset_format, &dataset_path, Context::Query)?;
        let size = dataset.size();
        let requested = config.int("query_count", Some(i64::try_from(size).unwrap_or(i64::MAX)))?;
        let requested = usize::try_from(requested).map_err(|_| {
                                                        StepError::configuration(format!("`query_count` must be >= 0 for step `{name}`, got {requested}"))
                                                    })?;
        let query_count = requested.min(size);
        if requested > size {
            warn!("step `{name}`: query_count {requested} exceeds dataset size {size}, using {query_count}");
        }

        let neighbors = if calculate_recall {
            let path = neighbors_path.ok_or_else(|| {
                                          StepError::configuration(format!("`neighbors_path` must be set for step `{name}` when `calculate_recall` is true"))
                                      })?;
            Some(ctx.datasets.open(&neighbors_format, &path, Context::Neighbors)?)
        } else {
            None
        };

        let connection = ConnectionParams { endpoint,
                                            port,
                                            timeout: Duration::from_secs(timeout as u64) };
        let client = ctx.clients
                        .connect(&connection)
                        .map_err(|e| StepError::configuration(format!("cannot build search client for step `{name}`: {e}")))?;
        debug!("step `{name}`: {}:{} index={index_name} field={field_name} k={k} r={r} queries={query_count} recall={calculate_recall}",
               connection.endpoint,
               connection.port);

        Ok(Self { status: StepStatus::default(),
                  client,
                  connection,
                  k,
                  r,
                  index_name,
                  field_name,
                  calculate_recall,
                  dataset,
                  neighbors,
                  query_count })
    }

    pub fn connection(&self) -> &ConnectionParams {
        &self.connection
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn query_count(&self) -> usize {
        self.query_count
    }

    pub fn calculate_recall(&self) -> bool {
        self.calculate_recall
    }

    /// Request top-`k` sobre `field_name`.
    pub fn body(&self, vector: &[f32]) -> Value {
        let mut knn = Map::new();
        knn.insert(self.field_name.clone(), json!({ "vector": vector, "k": self.k }));
        json!({ "size": self.k, "query": { "knn": knn } })
    }

    fn recall_r_key(&self) -> String {
        format!("recall@{}", self.r)
    }

    async fn run_trials(&mut self) -> Result<Vec<QueryResult>, StepError> {
        let excluded = [self.field_name.clone()];
        let mut responses = Vec::with_capacity(self.query_count);
        for trial in 0..self.query_count {
            let Some(batch) = self.dataset.read(1)? else {
                warn!("query dataset exhausted after {trial} of {} trials", self.query_count);
                break;
            };
            let Some(vector) = batch.into_vectors()?.into_iter().next() else {
                warn!("query dataset exhausted after {trial} of {} trials", self.query_count);
                break;
            };
            let body = self.body(&vector);

            let start = Instant::now();
            let response = self.client
                               .search(&self.index_name, &body, &excluded)
                               .await
                               .map_err(|e| StepError::transport(trial, e))?;
            let client_time = start.elapsed().as_secs_f64() * 1000.0;

            debug!("trial {trial}: took={}ms client_time={client_time:.3}ms hits={}", response.took, response.hits.len());
            responses.push(QueryResult { took: response.took,
                                         client_time,
                                         hits: response.hits });
        }
        Ok(responses)
    }
}

/// Ids de cada trial como enteros; un id no numérico falla en su trial.
fn numeric_hits(responses: &[QueryResult]) -> Result<Vec<Vec<i64>>, StepError> {
    responses.iter()
             .enumerate()
             .map(|(trial, q)| {
                 q.hits
                  .iter()
                  .map(|id| id.parse::<i64>().map_err(|e| StepError::transport(trial, format!("non-numeric hit id `{id}`: {e}"))))
                  .collect::<Result<Vec<_>, _>>()
             })
             .collect()
}

fn positive(config: &StepConfig, key: &str, default: i64) -> Result<usize, StepError> {
    let value = config.int(key, Some(default))?;
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(StepError::configuration(format!("`{key}` must be positive for step `{}`, got {value}", config.step_name()))),
    }
}

#[async_trait]
impl Step for QueryStep {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn measures(&self) -> Vec<String> {
        let mut measures = vec!["took".to_string(), "memory_kb".to_string(), "client_time".to_string()];
        if self.calculate_recall {
            measures.push("recall@K".to_string());
            measures.push(self.recall_r_key());
        }
        measures
    }

    fn status(&self) -> StepStatus {
        self.status
    }

    fn status_mut(&mut self) -> &mut StepStatus {
        &mut self.status
    }

    async fn action(&mut self) -> Result<Measures, StepError> {
        let responses = self.run_trials().await?;

        let mut measures = Measures::new();
        measures.insert("took".into(), MeasureValue::Series(responses.iter().map(|q| q.took).collect()));
        measures.insert("client_time".into(), MeasureValue::Series(responses.iter().map(|q| q.client_time).collect()));
        // Sin medición de memoria del servicio: cero por trial.
        measures.insert("memory_kb".into(), MeasureValue::Series(vec![0.0; responses.len()]));

        let recall_r_key = self.recall_r_key();
        if let Some(neighbors) = self.neighbors.as_mut() {
            let ids = numeric_hits(&responses)?;
            let executed = responses.len();
            neighbors.reset()?;
            let at_k = recall_at_r(&ids, neighbors.as_mut(), self.k, self.k, executed)?;
            neighbors.reset()?;
            let at_r = recall_at_r(&ids, neighbors.as_mut(), self.r, self.k, executed)?;
            neighbors.reset()?;
            measures.insert("recall@K".into(), MeasureValue::Scalar(at_k));
            measures.insert(recall_r_key, MeasureValue::Scalar(at_r));
        }
        self.dataset.reset()?;
        Ok(measures)
    }
}
