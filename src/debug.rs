use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::app_state::AppState;
use crate::domain::allocation::model::AllocationParams;

/// Runs only when in GREENCOST_DEBUG_MODE: one pipeline pass against the
/// configured backend, then exit.
pub async fn run_debug(state: &AppState) {
    info!("🔧 Debug mode: running debug tasks...");

    let params = AllocationParams::default();
    let resp = state
        .allocation_service
        .run(&params, Utc::now(), &mut StdRng::from_entropy())
        .await;

    info!(
        "Cost allocation for {}: {} row(s), source={:?}",
        params.window,
        resp.data.len(),
        resp.source
    );

    info!("Debug tasks completed. Exiting...");
}
