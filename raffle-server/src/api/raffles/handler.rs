//! Raffle history handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::models::Raffle;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Serialize)]
pub struct RaffleListResponse {
    pub raffles: Vec<Raffle>,
}

/// GET /api/raffles - all raffles, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<RaffleListResponse>> {
    let raffles = state.raffles.raffle_history().await?;
    Ok(Json(RaffleListResponse { raffles }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleDetailBody {
    #[serde(flatten)]
    pub raffle: Raffle,
    pub participant_count: i64,
    pub total_entries: i64,
}

#[derive(Serialize)]
pub struct RaffleDetailResponse {
    pub raffle: RaffleDetailBody,
}

/// GET /api/raffles/:id - one raffle with participants and entry totals
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RaffleDetailResponse>> {
    let detail = state.raffles.raffle_detail(id).await?;
    Ok(Json(RaffleDetailResponse {
        raffle: RaffleDetailBody {
            raffle: detail.raffle,
            participant_count: detail.tally.participants,
            total_entries: detail.tally.total_entries,
        },
    }))
}
