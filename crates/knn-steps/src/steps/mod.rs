//! Steps de benchmark incluidos.
//!
//! - `query`: ejecuta búsquedas k-NN secuenciales y mide latencia y recall.

pub mod query;
