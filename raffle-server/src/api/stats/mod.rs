//! Statistics API

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::raffle::RaffleStats;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/stats", get(stats))
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: RaffleStats,
}

/// GET /api/stats - landing page counters
async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.raffles.stats().await?;
    Ok(Json(StatsResponse { stats }))
}
