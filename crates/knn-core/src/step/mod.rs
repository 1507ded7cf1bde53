//! Definiciones relacionadas a Steps.
//!
//! Un Step ejecuta una unidad de trabajo medida y devuelve un mapa
//! `nombre de medida -> serie por trial | escalar`. Este módulo define:
//! - `Step`: interfaz polimórfica usada por el engine y el registro.
//! - `StepStatus`: máquina de estados del step.
//! - `StepResult`, `Measures`, `MeasureValue`.

pub mod definition;
mod result;
mod status;

pub use definition::Step;
pub use result::{MeasureValue, Measures, StepResult};
pub use status::StepStatus;
