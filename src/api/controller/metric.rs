use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::metric::model::MetricsSnapshotResponse;
use crate::errors::AppError;

pub struct MetricSnapshotController;

impl MetricSnapshotController {
    pub async fn get_metrics(
        State(state): State<AppState>,
    ) -> Result<Json<MetricsSnapshotResponse>, AppError> {
        to_json(state.metric_service.get_metrics(Utc::now()).await)
    }
}
