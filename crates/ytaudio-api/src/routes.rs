//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::batch::{batch_download, batch_status};
use crate::handlers::download::download_audio;
use crate::handlers::health::root;
use crate::middleware::{cors_layer, rate_limit_middleware, request_logging, RateLimiterCache};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    // Download is the expensive route; it carries its own per-IP quota
    let download_limiter = Arc::new(RateLimiterCache::new(state.config.download_rate_per_minute));
    let download_routes = Router::new()
        .route("/download", get(download_audio))
        .layer(middleware::from_fn_with_state(
            download_limiter,
            rate_limit_middleware,
        ));

    Router::new()
        .merge(download_routes)
        .route("/batch-download", post(batch_download))
        .route("/batch-download/:batch_id", get(batch_status))
        .route("/", get(root))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer())
        .with_state(state)
}
