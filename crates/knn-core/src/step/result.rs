use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Valor de una medida: serie ordenada por trial o escalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureValue {
    Series(Vec<f64>),
    Scalar(f64),
}

impl MeasureValue {
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            MeasureValue::Series(v) => Some(v),
            MeasureValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MeasureValue::Scalar(v) => Some(*v),
            MeasureValue::Series(_) => None,
        }
    }
}

/// Medidas en orden de inserción (estable en la salida JSON).
pub type Measures = IndexMap<String, MeasureValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub label: String,
    pub measures: Measures,
}

impl StepResult {
    pub fn get(&self, measure: &str) -> Option<&MeasureValue> {
        self.measures.get(measure)
    }
}
