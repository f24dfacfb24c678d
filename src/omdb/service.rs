use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::client::{details_url, search_url, Upstream, UpstreamError};
use super::types::{known, upstream_failure, Envelope, MovieDetails, SearchPage};
use crate::error::ProxyError;

pub const EMPTY_QUERY_MESSAGE: &str = "Please provide a movie name to search";
pub const MISSING_ID_MESSAGE: &str = "Movie ID is required";
pub const NO_MOVIES_FOUND_MESSAGE: &str = "No movies found";
pub const MOVIE_NOT_FOUND_MESSAGE: &str = "Movie not found";
pub const INVALID_QUERY_MESSAGE: &str = "Invalid query string";

/// Blank the way a browser's `String.prototype.trim` sees it, BOM included.
fn is_blank(text: &str) -> bool {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty()
}

/// What a successful proxy call hands back to the caller.
#[derive(Debug)]
pub enum ProxyReply {
    /// Upstream success body, untouched.
    Found(Bytes),
    /// Upstream said `"Response":"False"`.
    Failed(Envelope),
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        match self {
            ProxyReply::Found(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(body),
            )
                .into_response(),
            ProxyReply::Failed(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        }
    }
}

#[derive(Clone)]
pub struct MovieService {
    base_url: String,
    api_key: Option<String>,
    upstream: Arc<dyn Upstream>,
}

impl MovieService {
    pub fn new(base_url: String, api_key: Option<String>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            base_url,
            api_key,
            upstream,
        }
    }

    pub async fn search(&self, query: Option<&str>) -> Result<ProxyReply, ProxyError> {
        let api_key = self.api_key()?;
        let query = match query {
            Some(q) if !is_blank(q) => q,
            _ => return Err(ProxyError::Validation(EMPTY_QUERY_MESSAGE)),
        };

        let url = search_url(&self.base_url, api_key, query);
        let reply = self
            .forward(&url, NO_MOVIES_FOUND_MESSAGE)
            .await
            .map_err(|e| {
                warn!(query = %query, error = %e, "search failed");
                ProxyError::from(e)
            })?;

        match &reply {
            ProxyReply::Found(body) => match serde_json::from_slice::<SearchPage>(body) {
                Ok(page) => info!(
                    query = %query,
                    returned = page.search.len(),
                    total = page.total_results.as_deref().unwrap_or("?"),
                    "search completed"
                ),
                Err(e) => debug!(query = %query, error = %e, "search reply has unexpected shape"),
            },
            ProxyReply::Failed(envelope) => info!(
                query = %query,
                error = envelope.error.as_deref().unwrap_or_default(),
                "search returned no results"
            ),
        }
        Ok(reply)
    }

    pub async fn details(&self, id: Option<&str>) -> Result<ProxyReply, ProxyError> {
        let api_key = self.api_key()?;
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ProxyError::Validation(MISSING_ID_MESSAGE)),
        };

        let url = details_url(&self.base_url, api_key, id);
        let reply = self
            .forward(&url, MOVIE_NOT_FOUND_MESSAGE)
            .await
            .map_err(|e| {
                warn!(id = %id, error = %e, "details failed");
                ProxyError::from(e)
            })?;

        match &reply {
            ProxyReply::Found(body) => match serde_json::from_slice::<MovieDetails>(body) {
                Ok(movie) => info!(
                    id = %id,
                    title = %movie.title,
                    rating = known(&movie.imdb_rating).unwrap_or("-"),
                    "details completed"
                ),
                Err(e) => debug!(id = %id, error = %e, "details reply has unexpected shape"),
            },
            ProxyReply::Failed(envelope) => info!(
                id = %id,
                error = envelope.error.as_deref().unwrap_or_default(),
                "details not found"
            ),
        }
        Ok(reply)
    }

    fn api_key(&self) -> Result<&str, ProxyError> {
        self.api_key.as_deref().ok_or(ProxyError::Configuration)
    }

    /// One upstream round trip. Failure envelopes are reduced to
    /// `Response` + `Error`; any other JSON passes through as-is.
    async fn forward(&self, url: &str, fallback: &str) -> Result<ProxyReply, UpstreamError> {
        let body = self.upstream.fetch(url).await?;
        let reply: Value = serde_json::from_slice(&body)?;

        match upstream_failure(&reply, fallback) {
            Some(envelope) => Ok(ProxyReply::Failed(envelope)),
            None => Ok(ProxyReply::Found(body)),
        }
    }
}
