use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;
use tracing::debug;

use super::service::{ProxyReply, INVALID_QUERY_MESSAGE};
use crate::error::ProxyError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    pub id: Option<String>,
}

/// Keeps malformed query strings (e.g. a repeated `q`) inside the envelope format.
fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ProxyError> {
    match params {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            debug!(error = %rejection, "rejected query string");
            Err(ProxyError::Validation(INVALID_QUERY_MESSAGE))
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<ProxyReply, ProxyError> {
    let params = query_params(params)?;
    state.movies.search(params.q.as_deref()).await
}

pub async fn details(
    State(state): State<AppState>,
    params: Result<Query<DetailsParams>, QueryRejection>,
) -> Result<ProxyReply, ProxyError> {
    let params = query_params(params)?;
    state.movies.details(params.id.as_deref()).await
}
