//! Participation Model

use serde::{Deserialize, Serialize};

/// Where a set of entries came from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum ParticipationSource {
    Registration,
    #[default]
    DailyVisit,
    Referral,
    SocialShare,
    TestDrive,
    VisitDealership,
}

/// Weighted entry record linking a user to a raffle (immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Participation {
    pub id: i64,
    pub user_id: i64,
    pub raffle_id: i64,
    /// Weight in the draw, always >= 1
    pub entries: i64,
    pub source: ParticipationSource,
    /// The registration entry already counted in `User::total_entries`
    pub is_initial: bool,
    /// Unix millis
    pub participated_at: i64,
}

/// Record-entries request
#[derive(Debug, Clone)]
pub struct ParticipationCreate {
    pub user_id: i64,
    pub raffle_id: i64,
    pub entries: i64,
    pub source: ParticipationSource,
}
