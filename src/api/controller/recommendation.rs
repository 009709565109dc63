use axum::extract::State;
use axum::Json;

use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::recommendation::model::Recommendation;
use crate::errors::AppError;

pub struct RecommendationController;

impl RecommendationController {
    pub async fn list_recommendations(
        State(state): State<AppState>,
    ) -> Result<Json<Vec<Recommendation>>, AppError> {
        to_json(state.recommendation_service.list_recommendations().await)
    }
}
