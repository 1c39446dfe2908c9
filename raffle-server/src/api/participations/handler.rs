//! Participation API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{Participation, ParticipationCreate, ParticipationSource, UserSummary};

use crate::api::admin_payload;
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequest {
    pub user_id: Option<i64>,
    /// Defaults to today's raffle
    pub raffle_id: Option<i64>,
    /// Defaults to 1
    pub entries: Option<i64>,
    /// Defaults to `daily_visit`
    pub source: Option<ParticipationSource>,
}

#[derive(Serialize)]
pub struct ParticipationResponse {
    pub success: bool,
    pub participation: Participation,
    pub user: UserSummary,
}

/// POST /api/participations - award entries to a user
pub async fn create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ParticipationResponse>> {
    let payload: ParticipationRequest = admin_payload(&state, body)?;
    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::required_field("userId"))?;

    let raffle_id = match payload.raffle_id {
        Some(id) => id,
        None => {
            state
                .raffles
                .ensure_todays_raffle()
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::NoRaffleToday))?
                .id
        }
    };

    let participation = state
        .raffles
        .record_participation(ParticipationCreate {
            user_id,
            raffle_id,
            entries: payload.entries.unwrap_or(1),
            source: payload.source.unwrap_or_default(),
        })
        .await?;

    let user = user_repo::find_by_id(state.pool(), user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(ParticipationResponse {
        success: true,
        participation,
        user: UserSummary::from(&user),
    }))
}
