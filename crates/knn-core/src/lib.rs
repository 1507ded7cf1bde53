//! knn-core: motor de steps de benchmark k-NN
//!
//! Contiene la abstracción de Step, la resolución de parámetros, el registro
//! (factory) de tipos de step, el engine secuencial y el evaluador de recall.
//! Los datasets y el cliente de búsqueda se definen aquí sólo como contratos;
//! las implementaciones viven en `knn-datasets` y `knn-client`.
pub mod constants;
pub mod context;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod params;
pub mod recall;
pub mod registry;
pub mod search;
pub mod step;

pub use context::ExecutionContext;
pub use dataset::{Context, Dataset, DatasetError, DatasetOpener, DatasetRows};
pub use engine::StepEngine;
pub use errors::{BoxError, StepError};
pub use params::{merge_json, StepConfig};
pub use recall::recall_at_r;
pub use registry::StepRegistry;
pub use search::{ClientFactory, ConnectionParams, QueryResult, SearchClient, SearchResponse};
pub use step::{MeasureValue, Measures, Step, StepResult, StepStatus};
