//! Raffle Model

use serde::{Deserialize, Serialize};

use super::prize::PrizeSnapshot;

/// Raffle lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum RaffleStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl RaffleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One day's prize drawing (one row per business date)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Raffle {
    pub id: i64,
    /// Business date, `YYYY-MM-DD`
    pub date: String,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub prize: PrizeSnapshot,
    pub status: RaffleStatus,
    /// Distinct user ids, loaded from the participant set
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub participants: Vec<i64>,
    pub winner_id: Option<i64>,
    /// Scheduled draw time, unix millis
    pub draw_time: i64,
    /// When the draw actually ran, unix millis
    pub drawn_at: Option<i64>,
    pub max_participants: Option<i64>,
    pub created_at: i64,
}

impl Raffle {
    pub fn is_active(&self) -> bool {
        self.status == RaffleStatus::Active
    }
}

/// Insert payload for a new raffle
#[derive(Debug, Clone)]
pub struct RaffleCreate {
    pub date: String,
    pub prize: PrizeSnapshot,
    pub status: RaffleStatus,
    pub draw_time: i64,
    pub max_participants: Option<i64>,
}

/// Aggregated entry counts for one raffle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RaffleTally {
    /// Distinct users with at least one participation
    pub participants: i64,
    /// Sum of entries over all participations
    pub total_entries: i64,
}
