//! User API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use shared::models::{Participation, User};

use crate::core::ServerState;
use crate::raffle::stats::UserOdds;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/users/{id}", get(get_by_id))
}

#[derive(Serialize)]
pub struct UserDetailResponse {
    pub user: User,
    pub participations: Vec<Participation>,
    /// Odds in today's raffle
    pub odds: Option<UserOdds>,
}

/// GET /api/users/:id - user with participations and today's odds
async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserDetailResponse>> {
    let detail = state.raffles.user_detail(id).await?;
    Ok(Json(UserDetailResponse {
        user: detail.user,
        participations: detail.participations,
        odds: detail.odds,
    }))
}
