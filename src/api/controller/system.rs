//! System controller: connects routes to system usecases

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct SystemController;

impl SystemController {
    pub async fn health(
        State(state): State<AppState>,
    ) -> Result<Json<Value>, AppError> {
        to_json(state.system_service.health().await)
    }
}
