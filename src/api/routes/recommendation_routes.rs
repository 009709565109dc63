use axum::{routing::get, Router};

use crate::api::controller::recommendation::RecommendationController;
use crate::app_state::AppState;

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", get(RecommendationController::list_recommendations))
}
