use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::omdb::MovieService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MovieService,
}

impl AppState {
    pub fn new(config: Config, movies: MovieService) -> Self {
        Self {
            config: Arc::new(config),
            movies,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/search", get(crate::omdb::search))
        .route("/api/details", get(crate::omdb::details));

    let mut router = Router::new()
        .route("/healthz", get(healthz_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
