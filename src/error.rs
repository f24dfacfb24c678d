use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::omdb::{Envelope, UpstreamError};

pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Service unavailable. Please try again later.";
pub const MISSING_API_KEY_MESSAGE: &str = "API key not configured";

/// Failures of the proxy endpoints. Each maps to one fixed status code and
/// a `{"Response":"False","Error":...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("OMDb API key not configured")]
    Configuration,
    #[error("upstream unavailable: {0}")]
    ServiceUnavailable(#[from] UpstreamError),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The message shown to the caller. Upstream error text stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::Validation(msg) => *msg,
            ProxyError::Configuration => MISSING_API_KEY_MESSAGE,
            ProxyError::ServiceUnavailable(_) => SERVICE_UNAVAILABLE_MESSAGE,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(Envelope::failure(self.public_message()))).into_response()
    }
}
