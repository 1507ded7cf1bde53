//! Errores del cliente HTTP.
//! Mapea errores de reqwest a variantes según su causa.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("cannot connect: {0}")]
    Connect(String),
    #[error("search service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("cannot decode search response: {0}")]
    Decode(String),
    #[error("http error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status { status: status.as_u16(),
                           body: String::new() }
        } else {
            Self::Http(err.to_string())
        }
    }
}
