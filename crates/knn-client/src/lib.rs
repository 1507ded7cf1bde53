//! Cliente REST del servicio de búsqueda k-NN (API `_search` de OpenSearch).

pub mod client;
pub mod error;

pub use client::{OpenSearchClient, OpenSearchClientFactory};
pub use error::ClientError;
