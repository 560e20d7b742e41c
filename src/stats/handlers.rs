use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::GameStats;
use crate::shared::{AppError, AppState};

/// HTTP handler for the stats dashboard
///
/// GET /stats/:user_id
/// Returns the user's GameStats, or null when there are no games to aggregate
#[instrument(name = "dashboard_stats", skip(state))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Option<GameStats>>, AppError> {
    info!(user_id = %user_id, "Computing dashboard stats");

    let stats = state.stats_service.dashboard_stats(&user_id).await?;

    info!(
        user_id = %user_id,
        has_stats = stats.is_some(),
        "Dashboard stats served"
    );

    Ok(Json(stats))
}
