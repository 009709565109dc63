use axum::{
    http::Uri,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use crate::api::routes::{
    allocation_routes::allocation_routes, metrics_routes::metrics_routes,
    recommendation_routes::recommendation_routes, system_routes::system_routes,
};
use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let api = Router::new()
        .merge(system_routes())
        .merge(metrics_routes())
        .merge(allocation_routes())
        .merge(recommendation_routes());

    Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .fallback(handler_404)
        // The dashboard is served from a different origin
        .layer(CorsLayer::very_permissive())
}

async fn root() -> &'static str {
    "Server is running!"
}

async fn handler_404(uri: Uri) -> AppError {
    AppError::NotFound(format!("The requested resource was not found: {}", uri.path()))
}
