//! Registration API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::{PrizeSnapshot, UserSummary};

use crate::core::ServerState;
use crate::raffle::registration::validate_registration;
use crate::utils::AppResult;

const ENTERED_MESSAGE: &str = "¡Registro exitoso! Has sido inscrito en el sorteo de hoy.";
const NOT_ENTERED_MESSAGE: &str = "¡Registro exitoso! Participarás en el próximo sorteo.";

/// Raw form; every field is checked by `validate_registration`
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredRaffle {
    pub id: i64,
    pub prize: PrizeSnapshot,
    pub draw_time: i64,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
    pub raffle: Option<RegisteredRaffle>,
}

/// POST /api/register - register and enter today's raffle
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let data = validate_registration(
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.phone.as_deref(),
    )?;

    let registration = state.raffles.register(data).await?;

    let message = if registration.entered {
        ENTERED_MESSAGE
    } else {
        NOT_ENTERED_MESSAGE
    };
    Ok(Json(RegisterResponse {
        success: true,
        message: message.to_string(),
        user: UserSummary::from(&registration.user),
        raffle: registration.raffle.map(|r| RegisteredRaffle {
            id: r.id,
            prize: r.prize,
            draw_time: r.draw_time,
        }),
    }))
}
