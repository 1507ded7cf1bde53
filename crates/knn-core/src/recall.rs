//! Evaluador de recall@R contra un dataset de vecinos verdaderos.
//!
//! Para cada query `i`:
//! 1. Se lee la siguiente fila de `neighbors` (una por query, en orden de trial).
//! 2. Se trunca a los primeros `k` ids y se descarta el centinela `-1`.
//! 3. `m = min(r, |verdad|)`: slots de esta query que pueden ser correctos.
//! 4. Se cuentan los primeros `m` ids devueltos que pertenecen a la verdad.
//!
//! El denominador acumula `m` por query (no `r * query_count`).

use std::collections::HashSet;

use log::debug;

use crate::constants::SENTINEL_ID;
use crate::dataset::Dataset;
use crate::errors::StepError;

/// Calcula recall@R. `results[i]` son los ids devueltos para la query `i`, en
/// el orden del servicio. Consume `neighbors` desde su cursor actual.
///
/// Si `neighbors` se agota antes de `query_count` filas, se detiene sin error.
/// Una lista de resultados más corta que `m` cuenta los slots faltantes como
/// incorrectos. Devuelve `StepError::DegenerateRecall` si ninguna query tiene
/// vecinos verdaderos dentro de `k`.
pub fn recall_at_r(results: &[Vec<i64>], neighbors: &mut dyn Dataset, r: usize, k: usize, query_count: usize) -> Result<f64, StepError> {
    let mut correct = 0usize;
    let mut denominator = 0usize;
    for query in 0..query_count {
        let Some(batch) = neighbors.read(1)? else {
            debug!("recall: neighbors exhausted after {query} rows");
            break;
        };
        let Some(row) = batch.into_ids()?.into_iter().next() else {
            break;
        };
        let truth: HashSet<i64> = row.iter().take(k).copied().filter(|id| *id != SENTINEL_ID).collect();
        let m = r.min(truth.len());
        let returned = results.get(query).map(Vec::as_slice).unwrap_or_default();
        correct += returned.iter().take(m).filter(|id| truth.contains(*id)).count();
        denominator += m;
    }
    if denominator == 0 {
        return Err(StepError::DegenerateRecall);
    }
    Ok(correct as f64 / denominator as f64)
}
