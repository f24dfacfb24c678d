use async_trait::async_trait;
use axum::body::Bytes;
use std::time::Duration;

/// Upper bound on a single OMDb round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("upstream body is not a JSON envelope: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The single outbound call the proxy makes. Swapped for a double in tests.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, UpstreamError>;
}

pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new() -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("moviefinder-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, url: &str) -> Result<Bytes, UpstreamError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}

pub fn search_url(base_url: &str, api_key: &str, query: &str) -> String {
    format!(
        "{}?apikey={}&s={}&type=movie",
        base_url,
        urlencoding::encode(api_key),
        urlencoding::encode(query)
    )
}

pub fn details_url(base_url: &str, api_key: &str, id: &str) -> String {
    format!(
        "{}?apikey={}&i={}&plot=full",
        base_url,
        urlencoding::encode(api_key),
        urlencoding::encode(id)
    )
}
