//! Prize catalog API

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::models::Prize;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/prizes", get(list))
}

#[derive(Serialize)]
pub struct PrizeListResponse {
    pub prizes: Vec<Prize>,
}

/// GET /api/prizes - active catalog
async fn list(State(state): State<ServerState>) -> AppResult<Json<PrizeListResponse>> {
    let prizes = state.raffles.active_prizes().await?;
    Ok(Json(PrizeListResponse { prizes }))
}
