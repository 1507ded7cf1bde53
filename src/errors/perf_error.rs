use knn_core::StepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerfError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid test file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid test configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Step(#[from] StepError),
}

impl PerfError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_variant_from() {
        let err: PerfError = std::io::Error::other("disk gone").into();
        assert_eq!(err.to_string(), "io error: disk gone");
    }

    #[test]
    fn step_errors_are_transparent() {
        let err: PerfError = StepError::configuration("invalid step `bogus`").into();
        assert_eq!(err.to_string(), "configuration error: invalid step `bogus`");
    }

    #[test]
    fn config_variant_format() {
        assert_eq!(PerfError::config("num_runs must be >= 1").to_string(),
                   "invalid test configuration: num_runs must be >= 1");
    }
}
