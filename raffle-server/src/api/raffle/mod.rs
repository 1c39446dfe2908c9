//! Daily raffle API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/raffle", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/current", get(handler::current))
        .route("/winners", get(handler::winners))
        // adminKey in body
        .route("/draw", post(handler::draw))
}
