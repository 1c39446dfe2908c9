//! Daily raffle API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{PrizeSnapshot, RaffleStatus};

use crate::api::admin_payload;
use crate::core::ServerState;
use crate::raffle::RecentWinner;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRaffle {
    pub id: i64,
    pub date: String,
    pub prize: PrizeSnapshot,
    pub status: RaffleStatus,
    pub draw_time: i64,
    pub max_participants: Option<i64>,
    pub current_participants: i64,
    pub total_entries: i64,
    /// `None` without a participant cap
    pub remaining_slots: Option<i64>,
}

#[derive(Serialize)]
pub struct CurrentRaffleResponse {
    pub raffle: CurrentRaffle,
}

/// GET /api/raffle/current - today's raffle with live counts
pub async fn current(State(state): State<ServerState>) -> AppResult<Json<CurrentRaffleResponse>> {
    let raffle = state
        .raffles
        .ensure_todays_raffle()
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoRaffleToday))?;
    let tally = state.raffles.tally(raffle.id).await?;

    Ok(Json(CurrentRaffleResponse {
        raffle: CurrentRaffle {
            id: raffle.id,
            date: raffle.date,
            prize: raffle.prize,
            status: raffle.status,
            draw_time: raffle.draw_time,
            max_participants: raffle.max_participants,
            current_participants: tally.participants,
            total_entries: tally.total_entries,
            remaining_slots: raffle
                .max_participants
                .map(|max| (max - tally.participants).max(0)),
        },
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    pub raffle_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnRaffle {
    pub id: i64,
    pub prize: PrizeSnapshot,
    pub status: RaffleStatus,
    pub draw_time: i64,
    pub winner_id: Option<i64>,
    pub drawn_at: Option<i64>,
}

#[derive(Serialize)]
pub struct WinnerInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct DrawResponse {
    pub success: bool,
    pub raffle: DrawnRaffle,
    pub winner: Option<WinnerInfo>,
    pub message: String,
}

/// POST /api/raffle/draw - draw today's winner (admin key)
pub async fn draw(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> AppResult<Json<DrawResponse>> {
    let payload: DrawRequest = admin_payload(&state, body)?;
    let raffle_id = payload.raffle_id.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "ID de sorteo requerido")
            .with_detail("field", "raffleId")
    })?;

    let outcome = state.raffles.draw_winner(raffle_id).await?;

    let message = match &outcome.winner {
        Some(user) => format!("¡{} ha ganado {}!", user.name, outcome.raffle.prize.name),
        None => "No hubo participantes en este sorteo".to_string(),
    };
    let raffle = outcome.raffle;

    Ok(Json(DrawResponse {
        success: true,
        raffle: DrawnRaffle {
            id: raffle.id,
            prize: raffle.prize,
            status: raffle.status,
            draw_time: raffle.draw_time,
            winner_id: raffle.winner_id,
            drawn_at: raffle.drawn_at,
        },
        winner: outcome.winner.map(|u| WinnerInfo {
            id: u.id,
            name: u.name,
            email: u.email,
        }),
        message,
    }))
}

#[derive(Serialize)]
pub struct WinnersResponse {
    pub winners: Vec<RecentWinner>,
}

/// GET /api/raffle/winners - up to 10 most recent winners
pub async fn winners(State(state): State<ServerState>) -> AppResult<Json<WinnersResponse>> {
    let winners = state.raffles.recent_winners().await?;
    Ok(Json(WinnersResponse { winners }))
}
