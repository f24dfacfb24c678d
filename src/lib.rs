pub mod config;
pub mod error;
pub mod middleware;
pub mod omdb;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Upstream client error: {0}")]
    Upstream(#[from] omdb::UpstreamError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::load(config_path)?;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("No config file given, using defaults and environment"),
    }
    if debug_logs {
        info!("Debug logging enabled");
    }

    config.validate()?;
    let api_key = config.api_key();
    match api_key.as_deref() {
        Some(key) => info!("Using OMDb API with key: {}", config::mask_key(key)),
        None => warn!("OMDb API key not configured, proxy endpoints will answer 500"),
    }

    let upstream = Arc::new(omdb::HttpUpstream::new()?);
    let movies = omdb::MovieService::new(config.omdb.base_url.clone(), api_key, upstream);

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    if let Some(ref appdir) = config.appdir {
        info!("Serving front end from {}", appdir);
    }

    let tls = config.listen.tlscert.clone().zip(config.listen.tlskey.clone());

    let state = server::AppState::new(config, movies);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Movie finder running at https://{}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Movie finder running at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
