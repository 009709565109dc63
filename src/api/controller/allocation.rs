use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::dto::cost_allocation_dto::CostAllocationQuery;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::allocation::model::CostAllocationResponse;
use crate::errors::AppError;

pub struct CostAllocationController;

impl CostAllocationController {
    pub async fn get_cost_allocation(
        State(state): State<AppState>,
        query: Result<Query<CostAllocationQuery>, QueryRejection>,
    ) -> Result<Json<CostAllocationResponse>, AppError> {
        let Query(q) = query?;
        let mut rng = StdRng::from_entropy();
        to_json(
            state
                .allocation_service
                .get_cost_allocation(q, Utc::now(), &mut rng)
                .await,
        )
    }
}
