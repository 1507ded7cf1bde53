//! Agregación de resultados de un test.
//!
//! Por step (posición en la lista) y medida:
//! - series: `count`, `mean`, `p50`, `p90`, `p99` sobre todos los trials de
//!   todos los runs (percentil nearest-rank);
//! - escalares: media entre runs.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use knn_core::{MeasureValue, StepConfig, StepResult};
use serde::Serialize;

use crate::hashing::config_hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub p50: Option<f64>,
    pub p90: Option<f64>,
    pub p99: Option<f64>,
}

impl SeriesStats {
    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let mean = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
        Self { count: values.len(),
               mean,
               p50: percentile(&values, 50.0),
               p90: percentile(&values, 90.0),
               p99: percentile(&values, 99.0) }
    }
}

/// Percentil nearest-rank sobre valores ya ordenados.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted.get(rank.clamp(1, sorted.len()) - 1).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasureSummary {
    Series(SeriesStats),
    Scalar { mean: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub label: String,
    /// SHA-256 de la configuración efectiva del step.
    pub config_hash: String,
    pub measures: IndexMap<String, MeasureSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReport {
    pub test_name: String,
    pub test_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub num_runs: usize,
    pub steps: Vec<StepSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<Vec<Vec<StepResult>>>,
}

#[derive(Default)]
struct Accumulator {
    series: Option<Vec<f64>>,
    scalars: Vec<f64>,
}

/// Resume los resultados de `runs` (cada run alineado con `configs`).
pub fn summarize(configs: &[StepConfig], runs: &[Vec<StepResult>]) -> Vec<StepSummary> {
    configs.iter()
           .enumerate()
           .map(|(position, config)| {
               let mut acc: IndexMap<String, Accumulator> = IndexMap::new();
               let mut label = config.step_name().to_string();
               for result in runs.iter().filter_map(|run| run.get(position)) {
                   label.clone_from(&result.label);
                   for (name, value) in &result.measures {
                       let entry = acc.entry(name.clone()).or_default();
                       match value {
                           MeasureValue::Series(values) => entry.series.get_or_insert_with(Vec::new).extend_from_slice(values),
                           MeasureValue::Scalar(v) => entry.scalars.push(*v),
                       }
                   }
               }
               let measures = acc.into_iter()
                                 .map(|(name, acc)| {
                                     let summary = match acc.series {
                                         Some(values) => MeasureSummary::Series(SeriesStats::from_values(values)),
                                         None => MeasureSummary::Scalar { mean: acc.scalars.iter().sum::<f64>() / acc.scalars.len().max(1) as f64 },
                                     };
                                     (name, summary)
                                 })
                                 .collect();
               StepSummary { label,
                             config_hash: config_hash(&config.effective()),
                             measures }
           })
           .collect()
}
