//! Metrics routes (e.g., /api/metrics)

use axum::{routing::get, Router};

use crate::api::controller::metric::MetricSnapshotController;
use crate::app_state::AppState;

/// Point-in-time energy/carbon/cost snapshot
pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(MetricSnapshotController::get_metrics))
}
