use axum::{routing::get, Router};

use crate::api::controller::allocation::CostAllocationController;
use crate::app_state::AppState;

pub fn allocation_routes() -> Router<AppState> {
    Router::new()
        .route("/cost-allocation", get(CostAllocationController::get_cost_allocation))
}
