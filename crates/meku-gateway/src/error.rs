//! Gateway error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Malformed(e.to_string())
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}
